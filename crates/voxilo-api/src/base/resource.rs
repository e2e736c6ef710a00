// Instance-level dispatch engine
//
// A `Resource` is a single identified entity: a public bag of response
// fields plus the private dispatch state (action path, identifier field,
// transport handle) it needs to self-update and self-delete without
// re-consulting the interface that built it. The private state is set once
// at construction and never serialized.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::base::response::{value_as_id, GenericResponse, Pagination};
use crate::error::Error;
use crate::transport::{HttpMethod, Params, SharedTransport, IS_VOICE_REQUEST};

/// How a dispatch helper reports failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Surface the failure to the caller unchanged.
    #[default]
    Propagate,
    /// Log the failure at `warn` and resolve with an empty result.
    SuppressAndLog,
}

/// A single identified entity bound to its collection endpoint.
///
/// Interfaces construct these from response data; afterwards the instance
/// carries everything needed for instance-scoped operations. `update`
/// mutates the instance in place, so the borrow checker rules out the
/// concurrent update/delete interleavings the API does not support.
pub struct Resource {
    transport: SharedTransport,
    action: String,
    id_field: &'static str,
    id: Option<String>,
    fields: Map<String, Value>,
}

impl Resource {
    /// Bind dispatch state and absorb initial response data.
    pub fn new(
        transport: SharedTransport,
        action: impl Into<String>,
        id_field: &'static str,
        data: Map<String, Value>,
    ) -> Self {
        let mut resource = Self {
            transport,
            action: action.into(),
            id_field,
            id: None,
            fields: Map::new(),
        };
        resource.absorb(data);
        resource
    }

    /// The entity's primary identifier, if known.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Look up a response field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All public response fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Merge a response object into the instance.
    ///
    /// The bound identifier field refreshes `id` and stays visible as data;
    /// a literal `id` key refreshes `id` only, since serialization re-emits
    /// it from the identifier slot.
    fn absorb(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            if key == self.id_field {
                if let Some(id) = value_as_id(&value) {
                    self.id = Some(id);
                }
            } else if key == "id" {
                if let Some(id) = value_as_id(&value) {
                    self.id = Some(id);
                }
                continue;
            }
            self.fields.insert(key, value);
        }
    }

    /// Update the entity: `POST <action><id>/`.
    ///
    /// `id` defaults to the instance id. On success the response body is
    /// merged onto the instance, then the remaining `params` (minus the
    /// transient voice-routing marker) are merged on top -- params override
    /// the body on conflict.
    pub async fn update(&mut self, mut params: Params, id: Option<&str>) -> Result<(), Error> {
        let id = match id {
            Some(id) => id.to_owned(),
            None => self.id.clone().ok_or(Error::MissingId {
                field: self.id_field,
            })?,
        };
        let path = format!("{}{id}/", self.action);
        debug!(path, "updating resource");

        let response = self
            .transport
            .request(HttpMethod::Post, &path, &params)
            .await?;
        self.absorb(response.into_object());
        params.remove(IS_VOICE_REQUEST);
        self.absorb(params);
        Ok(())
    }

    /// Delete the entity: `DELETE <action><id>/`.
    ///
    /// Resolves `true` on success; the response body is discarded and the
    /// instance is left untouched.
    pub async fn delete(&self, params: &Params) -> Result<bool, Error> {
        let id = self.id.as_deref().ok_or(Error::MissingId {
            field: self.id_field,
        })?;
        let path = format!("{}{id}/", self.action);
        debug!(path, "deleting resource");

        self.transport
            .request(HttpMethod::Delete, &path, params)
            .await?;
        Ok(true)
    }

    /// Execute a non-CRUD action: `<method> <action><task>`.
    ///
    /// `action` overrides the bound action path when the endpoint lives
    /// outside this resource's collection. Resolves a [`GenericResponse`]
    /// keyed by the bound identifier field.
    pub async fn execute_action(
        &self,
        task: &str,
        method: HttpMethod,
        params: &Params,
        action: Option<&str>,
    ) -> Result<GenericResponse, Error> {
        let base = action.unwrap_or(&self.action);
        let path = format!("{base}{task}");
        debug!(%method, path, "executing action");

        let response = self.transport.request(method, &path, params).await?;
        Ok(GenericResponse::new(
            response.into_object(),
            Some(self.id_field),
        ))
    }

    /// Execute an action against a fully custom path.
    pub async fn execute_at(
        &self,
        path: &str,
        method: HttpMethod,
        params: &Params,
    ) -> Result<GenericResponse, Error> {
        debug!(%method, path, "executing custom action");

        let response = self.transport.request(method, path, params).await?;
        Ok(GenericResponse::new(
            response.into_object(),
            Some(self.id_field),
        ))
    }

    /// Fetch the first phone number from a listing endpoint.
    ///
    /// Extracts `objects[0].number` from the response. Under
    /// [`ErrorPolicy::SuppressAndLog`] any failure -- transport or shape --
    /// is logged and resolves `Ok(None)` instead of an error.
    pub async fn first_number_at(
        &self,
        path: &str,
        method: HttpMethod,
        params: &Params,
        on_error: ErrorPolicy,
    ) -> Result<Option<String>, Error> {
        debug!(%method, path, "fetching first number");

        let attempt = self
            .transport
            .request(method, path, params)
            .await
            .and_then(|response| {
                first_number(&response.body).ok_or_else(|| Error::Deserialization {
                    message: "missing `objects[0].number` in response".into(),
                    body: response.body.to_string(),
                })
            });
        match attempt {
            Ok(number) => Ok(Some(number)),
            Err(error) if on_error == ErrorPolicy::SuppressAndLog => {
                warn!(%error, path, "suppressing number lookup failure");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Fetch only the total count from a listing endpoint's meta envelope.
    pub async fn total_count_at(
        &self,
        path: &str,
        method: HttpMethod,
        params: &Params,
    ) -> Result<u64, Error> {
        debug!(%method, path, "fetching meta count");

        let response = self.transport.request(method, path, params).await?;
        let meta = response.body.get("meta").ok_or_else(|| Error::Deserialization {
            message: "missing `meta` in response".into(),
            body: response.body.to_string(),
        })?;
        let meta: Pagination =
            serde_json::from_value(meta.clone()).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: response.body.to_string(),
            })?;
        Ok(meta.total_count)
    }
}

fn first_number(body: &Value) -> Option<String> {
    body.get("objects")?.get(0)?.get("number").and_then(value_as_id)
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("action", &self.action)
            .field("id", &self.id)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
