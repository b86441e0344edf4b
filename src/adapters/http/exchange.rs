//! In-memory Exchange and its conversion into an axum response.

use axum::{
    http::{header::HeaderName, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::ports::Exchange;

/// Exchange that buffers the request body and the response being written.
#[derive(Debug, Clone)]
pub struct BufferedExchange {
    method: Method,
    body: Vec<u8>,
    status: StatusCode,
    headers: HeaderMap,
    response: Value,
}

impl BufferedExchange {
    pub fn new(method: Method, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            body: body.into(),
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            response: Value::Null,
        }
    }

    /// Status written so far.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response header written so far.
    pub fn header(&self, name: HeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// JSON body written so far (`null` if none).
    pub fn json(&self) -> Value {
        self.response.clone()
    }
}

impl Exchange for BufferedExchange {
    fn method(&self) -> &Method {
        &self.method
    }

    fn body(&self) -> &[u8] {
        &self.body
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    fn write_json(&mut self, body: Value) {
        self.response = body;
    }
}

impl IntoResponse for BufferedExchange {
    fn into_response(self) -> Response {
        (self.status, self.headers, Json(self.response)).into_response()
    }
}
