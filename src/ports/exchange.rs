//! Exchange Port - The slice of an HTTP request/response the relay needs.
//!
//! Relay handlers are written against this trait rather than a web framework,
//! so the same handler runs behind axum, a serverless runtime, or a test.

use http::{header::HeaderName, HeaderValue, Method, StatusCode};
use serde_json::Value;

/// One request/response pair in flight.
pub trait Exchange: Send {
    /// HTTP method of the incoming request.
    fn method(&self) -> &Method;

    /// Raw request body.
    fn body(&self) -> &[u8];

    /// Sets the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Sets a response header, replacing any previous value.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Sets the JSON response body.
    fn write_json(&mut self, body: Value);
}
