// Subaccount resource
//
// Subaccounts partition a parent account's numbers, applications, and
// billing. Keyed by `auth_id` rather than a uuid-style id.

use std::ops::Deref;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::base::{ApiResource, GenericResponse, Resource, ResourceInterface, ResourceList};
use crate::error::Error;
use crate::transport::{Params, SharedTransport, IS_VOICE_REQUEST};

const ACTION: &str = "Subaccount/";
const ID_FIELD: &str = "auth_id";

fn mark_voice(params: &mut Params) {
    params.insert(IS_VOICE_REQUEST.to_owned(), Value::String("true".to_owned()));
}

fn normalize_cascade(params: &mut Params) {
    if let Some(Value::Bool(flag)) = params.get("cascade") {
        let flag = *flag;
        params.insert("cascade".to_owned(), Value::String(flag.to_string()));
    }
}

/// A single subaccount.
#[derive(Debug, Serialize)]
pub struct Subaccount {
    #[serde(flatten)]
    inner: Resource,
}

impl ApiResource for Subaccount {
    const ACTION: &'static str = ACTION;
    const ID_FIELD: &'static str = ID_FIELD;

    fn from_response(transport: SharedTransport, data: Map<String, Value>) -> Self {
        Self {
            inner: Resource::new(transport, ACTION, ID_FIELD, data),
        }
    }
}

impl Deref for Subaccount {
    type Target = Resource;

    fn deref(&self) -> &Resource {
        &self.inner
    }
}

impl Subaccount {
    /// Update this subaccount: `POST Subaccount/{auth_id}/`.
    pub async fn update(&mut self, mut params: Params) -> Result<(), Error> {
        mark_voice(&mut params);
        self.inner.update(params, None).await
    }

    /// Delete this subaccount: `DELETE Subaccount/{auth_id}/`.
    ///
    /// `cascade` also removes the subaccount's numbers and endpoints.
    pub async fn delete(&self, mut params: Params) -> Result<bool, Error> {
        normalize_cascade(&mut params);
        mark_voice(&mut params);
        self.inner.delete(&params).await
    }
}

/// Collection interface for subaccounts.
#[derive(Debug)]
pub struct SubaccountInterface {
    inner: ResourceInterface<Subaccount>,
}

impl SubaccountInterface {
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            inner: ResourceInterface::new(transport),
        }
    }

    /// Fetch one subaccount: `GET Subaccount/{auth_id}/`.
    pub async fn get(&self, id: &str) -> Result<Subaccount, Error> {
        let mut params = Params::new();
        mark_voice(&mut params);
        self.inner.get(Some(id), &params).await
    }

    /// List subaccounts: `GET Subaccount/`.
    pub async fn list(&self, mut params: Params) -> Result<ResourceList<Subaccount>, Error> {
        mark_voice(&mut params);
        self.inner.list(&params).await
    }

    /// Create a subaccount: `POST Subaccount/`.
    ///
    /// `name` is required and must be non-empty; checked before any request.
    pub async fn create(&self, name: &str, mut params: Params) -> Result<GenericResponse, Error> {
        if name.is_empty() {
            return Err(Error::Validation {
                field: "name".to_owned(),
                message: "is required".to_owned(),
            });
        }
        params.insert("name".to_owned(), Value::String(name.to_owned()));
        mark_voice(&mut params);
        self.inner.create(&params).await
    }

    /// Update a subaccount by id, resolving with the refreshed instance.
    pub async fn update(&self, id: &str, params: Params) -> Result<Subaccount, Error> {
        if id.is_empty() {
            return Err(Error::Validation {
                field: "id".to_owned(),
                message: "is required".to_owned(),
            });
        }
        let mut subaccount = transient(self.inner.transport(), id);
        subaccount.update(params).await?;
        Ok(subaccount)
    }

    /// Delete a subaccount by id.
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

fn transient(transport: &SharedTransport, id: &str) -> Subaccount {
    let mut data = Map::new();
    data.insert("id".to_owned(), Value::String(id.to_owned()));
    Subaccount::from_response(Arc::clone(transport), data)
}
