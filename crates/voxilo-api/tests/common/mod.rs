// Shared test transport: pops scripted responses and records every
// outbound call so tests can assert on method, path, and wire params.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use voxilo_api::{Error, HttpMethod, Params, Response, Transport};

/// One recorded outbound call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub params: Params,
}

/// Scripted in-process transport.
///
/// Responses are consumed front-to-back; once the script runs dry, calls
/// resolve with an empty JSON object.
#[derive(Default)]
pub struct MockTransport {
    queue: Mutex<VecDeque<Result<Value, Error>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_body(&self, body: Value) {
        self.queue.lock().unwrap().push_back(Ok(body));
    }

    pub fn push_error(&self, error: Error) {
        self.queue.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &Params,
    ) -> Result<Response, Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_owned(),
            params: params.clone(),
        });
        match self.queue.lock().unwrap().pop_front() {
            Some(Ok(body)) => Ok(Response::new(body)),
            Some(Err(error)) => Err(error),
            None => Ok(Response::new(Value::Object(Params::new()))),
        }
    }
}

/// Build `Params` from a `json!` object literal.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("params must be a JSON object, got: {other}"),
    }
}
