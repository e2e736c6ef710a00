// Application resource
//
// Applications bind answer/hangup/message URLs to numbers and endpoints.
// All application endpoints live on the voice API stack, so every call
// carries the voice-routing marker.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::base::{ApiResource, GenericResponse, Resource, ResourceInterface, ResourceList};
use crate::error::Error;
use crate::transport::{Params, SharedTransport, IS_VOICE_REQUEST};

const ACTION: &str = "Application/";
const ID_FIELD: &str = "app_id";

fn mark_voice(params: &mut Params) {
    params.insert(IS_VOICE_REQUEST.to_owned(), Value::String("true".to_owned()));
}

/// The API expects the cascade flag as a string; accept a JSON bool and
/// coerce it client-side.
fn normalize_cascade(params: &mut Params) {
    if let Some(Value::Bool(flag)) = params.get("cascade") {
        let flag = *flag;
        params.insert("cascade".to_owned(), Value::String(flag.to_string()));
    }
}

/// A single application.
///
/// Dereferences to [`Resource`] for field access and generic actions;
/// `update`/`delete` are overridden to inject the voice-routing marker and
/// the cascade coercion before delegating.
#[derive(Debug, Serialize)]
pub struct Application {
    #[serde(flatten)]
    inner: Resource,
}

impl ApiResource for Application {
    const ACTION: &'static str = ACTION;
    const ID_FIELD: &'static str = ID_FIELD;

    fn from_response(transport: SharedTransport, data: Map<String, Value>) -> Self {
        Self {
            inner: Resource::new(transport, ACTION, ID_FIELD, data),
        }
    }
}

impl Deref for Application {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.inner
    }
}

impl Application {
    /// Update this application: `POST Application/{app_id}/`.
    ///
    /// Accepts the url/method fields (`answer_url`, `hangup_url`,
    /// `message_url`, ...) plus the `default_number_app` /
    /// `default_endpoint_app` flags. The instance reflects the merged state
    /// on success.
    pub async fn update(&mut self, mut params: Params) -> Result<(), Error> {
        mark_voice(&mut params);
        self.inner.update(params, None).await
    }

    /// Delete this application: `DELETE Application/{app_id}/`.
    ///
    /// `cascade` deletes associated endpoints as well;
    /// `new_endpoint_application` relinks them to another application
    /// instead.
    pub async fn delete(&self, mut params: Params) -> Result<bool, Error> {
        normalize_cascade(&mut params);
        mark_voice(&mut params);
        self.inner.delete(&params).await
    }
}

/// Collection interface for applications.
#[derive(Debug)]
pub struct ApplicationInterface {
    inner: ResourceInterface<Application>,
}

impl ApplicationInterface {
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            inner: ResourceInterface::new(transport),
        }
    }

    /// Fetch one application by id: `GET Application/{app_id}/`.
    pub async fn get(&self, id: &str) -> Result<Application, Error> {
        let mut params = Params::new();
        mark_voice(&mut params);
        self.inner.get(Some(id), &params).await
    }

    /// List applications: `GET Application/`.
    ///
    /// Accepts `subaccount`, `limit`, and `offset` filters.
    pub async fn list(&self, mut params: Params) -> Result<ResourceList<Application>, Error> {
        mark_voice(&mut params);
        self.inner.list(&params).await
    }

    /// Create an application: `POST Application/`.
    ///
    /// `app_name` is required and must be non-empty; the check runs before
    /// any request is issued.
    pub async fn create(
        &self,
        app_name: &str,
        mut params: Params,
    ) -> Result<GenericResponse, Error> {
        if app_name.is_empty() {
            return Err(Error::Validation {
                field: "app_name".to_owned(),
                message: "is required".to_owned(),
            });
        }
        params.insert("app_name".to_owned(), Value::String(app_name.to_owned()));
        mark_voice(&mut params);
        self.inner.create(&params).await
    }

    /// Update an application by id, resolving with the refreshed instance.
    pub async fn update(&self, id: &str, params: Params) -> Result<Application, Error> {
        if id.is_empty() {
            return Err(Error::Validation {
                field: "id".to_owned(),
                message: "is required".to_owned(),
            });
        }
        let mut application = transient(self.inner.transport(), id);
        application.update(params).await?;
        Ok(application)
    }

    /// Delete an application by id.
    pub async fn delete(&self, id: &str, params: Params) -> Result<bool, Error> {
        if id.is_empty() {
            return Err(Error::Validation {
                field: "id".to_owned(),
                message: "is required".to_owned(),
            });
        }
        transient(self.inner.transport(), id).delete(params).await
    }
}

/// An instance carrying only an id, for id-scoped operations that never
/// fetched the entity.
fn transient(transport: &SharedTransport, id: &str) -> Application {
    let mut data = Map::new();
    data.insert("id".to_owned(), Value::String(id.to_owned()));
    Application::from_response(Arc::clone(transport), data)
}
