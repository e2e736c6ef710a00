// Nested-resource dispatch
//
// Some actions are scoped under a parent entity and a child entity at once
// (e.g. a member inside a conference). `SecondaryResource` composes the two
// path segments and keys the result by the child's identifier field.

use tracing::debug;

use crate::base::response::GenericResponse;
use crate::error::Error;
use crate::transport::{HttpMethod, Params, SharedTransport};

/// Dispatch state for a resource nested under a parent resource.
pub struct SecondaryResource {
    transport: SharedTransport,
    action: String,
    secondary_action: String,
    secondary_id_field: &'static str,
}

impl SecondaryResource {
    /// Bind the parent and child path segments and the child's id field.
    pub fn new(
        transport: SharedTransport,
        action: impl Into<String>,
        secondary_action: impl Into<String>,
        secondary_id_field: &'static str,
    ) -> Self {
        Self {
            transport,
            action: action.into(),
            secondary_action: secondary_action.into(),
            secondary_id_field,
        }
    }

    /// Execute an action against the nested path
    /// `<action><task>/<secondary_action><secondary_task>`.
    ///
    /// Resolves a [`GenericResponse`] keyed by the *secondary* identifier
    /// field, not the parent's.
    pub async fn execute_action(
        &self,
        task: &str,
        secondary_task: &str,
        method: HttpMethod,
        params: &Params,
    ) -> Result<GenericResponse, Error> {
        let path = format!(
            "{}{task}/{}{secondary_task}",
            self.action, self.secondary_action
        );
        debug!(%method, path, "executing nested action");

        let response = self.transport.request(method, &path, params).await?;
        Ok(GenericResponse::new(
            response.into_object(),
            Some(self.secondary_id_field),
        ))
    }
}
