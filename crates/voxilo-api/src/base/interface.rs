// Collection-level dispatch
//
// `ResourceInterface<T>` owns get/list/create against a collection endpoint
// and builds typed instances through the `ApiResource` factory contract.
// Concrete interfaces wrap it to inject per-resource request quirks.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::base::response::{GenericResponse, Pagination, ResourceList};
use crate::error::Error;
use crate::transport::{HttpMethod, Params, SharedTransport};

/// Factory contract every concrete resource type implements.
///
/// The interface never names a concrete type: it builds instances through
/// `from_response`, handing each one its own clone of the shared transport
/// so instances can self-update and self-delete later.
pub trait ApiResource: Sized {
    /// Collection path, ending in `/` (e.g. `"Application/"`). Empty for
    /// singleton endpoints addressed without an id.
    const ACTION: &'static str;

    /// Response field carrying the entity's primary key.
    const ID_FIELD: &'static str;

    /// Build an instance from a raw response object.
    fn from_response(transport: SharedTransport, data: Map<String, Value>) -> Self;
}

/// Shape of a list endpoint's response body.
#[derive(Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    meta: Pagination,
    #[serde(default)]
    objects: Vec<Map<String, Value>>,
}

/// Collection operations for a concrete resource type.
pub struct ResourceInterface<T> {
    transport: SharedTransport,
    id: Option<String>,
    _resource: PhantomData<fn() -> T>,
}

impl<T: ApiResource> ResourceInterface<T> {
    /// Bind the shared transport to `T`'s collection endpoint.
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            transport,
            id: None,
            _resource: PhantomData,
        }
    }

    /// Like [`new`](Self::new), but creation paths nest under an existing
    /// entity id: `POST <action><id>/`.
    pub fn nested(transport: SharedTransport, id: impl Into<String>) -> Self {
        Self {
            transport,
            id: Some(id.into()),
            _resource: PhantomData,
        }
    }

    /// The shared transport handle, for concrete interfaces that build
    /// transient instances themselves.
    pub fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Fetch one entity: `GET <action><id>/`.
    ///
    /// Fails fast with [`Error::MissingId`] -- before any request -- when
    /// `id` is absent or empty while the action path is non-empty. Singleton
    /// endpoints (empty action path) are fetched without an id.
    pub async fn get(&self, id: Option<&str>, params: &Params) -> Result<T, Error> {
        if !T::ACTION.is_empty() && id.is_none_or(str::is_empty) {
            return Err(Error::MissingId { field: T::ID_FIELD });
        }
        let path = match id {
            Some(id) if !id.is_empty() => format!("{}{id}/", T::ACTION),
            _ => T::ACTION.to_owned(),
        };
        debug!(path, "fetching resource");

        let response = self
            .transport
            .request(HttpMethod::Get, &path, params)
            .await?;
        Ok(T::from_response(
            Arc::clone(&self.transport),
            response.into_object(),
        ))
    }

    /// List the collection: `GET <action>`.
    ///
    /// Resolves the response's `objects` in order, each built through the
    /// factory, together with the pagination envelope.
    pub async fn list(&self, params: &Params) -> Result<ResourceList<T>, Error> {
        debug!(path = T::ACTION, "listing resources");

        let response = self
            .transport
            .request(HttpMethod::Get, T::ACTION, params)
            .await?;
        let body = response.body;
        let envelope: ListEnvelope =
            serde_json::from_value(body.clone()).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.to_string(),
            })?;

        let items = envelope
            .objects
            .into_iter()
            .map(|object| T::from_response(Arc::clone(&self.transport), object))
            .collect();
        Ok(ResourceList {
            items,
            meta: envelope.meta,
        })
    }

    /// Create an entity: `POST <action>[<id>/]`.
    ///
    /// The id segment appears only for interfaces built with
    /// [`nested`](Self::nested). Resolves a [`GenericResponse`] keyed by
    /// `T`'s identifier field.
    pub async fn create(&self, params: &Params) -> Result<GenericResponse, Error> {
        let path = match &self.id {
            Some(id) => format!("{}{id}/", T::ACTION),
            None => T::ACTION.to_owned(),
        };
        debug!(path, "creating resource");

        let response = self
            .transport
            .request(HttpMethod::Post, &path, params)
            .await?;
        Ok(GenericResponse::new(
            response.into_object(),
            Some(T::ID_FIELD),
        ))
    }
}

impl<T> fmt::Debug for ResourceInterface<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceInterface")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
