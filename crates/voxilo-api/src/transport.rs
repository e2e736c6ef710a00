// Injected transport boundary
//
// The SDK never speaks HTTP itself. Every resource and interface holds a
// shared handle to a `Transport` implementation supplied by the caller,
// which owns connections, authentication, TLS, timeouts, and retries.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Error;

/// Params marker routing a request to the voice API stack.
///
/// Concrete resources insert it before delegating to the dispatch layer;
/// transports consume it when choosing a base URL. The dispatch layer strips
/// it from `params` before merging them into local instance state, so the
/// marker never survives as entity data.
pub const IS_VOICE_REQUEST: &str = "is_voice_request";

/// HTTP verbs used by the dispatch layer.
///
/// The REST surface is deliberately narrow: reads are `GET`, creates and
/// updates are `POST`, removals are `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload: a JSON object the transport sends as query parameters
/// (`GET`) or as the request body (`POST`/`DELETE`).
pub type Params = Map<String, Value>;

/// Decoded response handed back by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Decoded JSON body. Empty-bodied responses decode to `Value::Null`.
    pub body: Value,
}

impl Response {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// The body as a JSON object, or an empty map when it is anything else.
    ///
    /// Merge-style consumers treat non-object bodies as "nothing to merge"
    /// rather than an error -- a response is not fallible at this layer.
    pub fn into_object(self) -> Map<String, Value> {
        match self.body {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

/// The injected client capability performing the actual network call.
///
/// Implementations map `params` onto the wire (query string for `GET`, JSON
/// body otherwise), attach credentials, and decode the response body to
/// JSON. Failures of any kind -- connection, TLS, HTTP status, remote API
/// error envelopes -- surface as [`Error`] and are propagated unchanged by
/// the dispatch layer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Response, Error>;
}

/// Shared handle to the injected transport.
///
/// Cloned freely into every resource instance an interface constructs; the
/// SDK never mutates it and takes no lifecycle ownership.
pub type SharedTransport = Arc<dyn Transport>;
