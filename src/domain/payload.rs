//! Opaque payloads produced by the AI collaborator.
//!
//! The relay never inspects these records. They are carried as raw JSON so
//! that whatever the collaborator returns reaches the caller field for field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured description of a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductDetails(Value);

impl ProductDetails {
    /// Wraps a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrows the underlying JSON.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the underlying JSON.
    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for ProductDetails {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Bill of Quantities: the list of items and materials a project requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boq(Value);

impl Boq {
    /// Wraps a raw JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Borrows the underlying JSON.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the wrapper and returns the underlying JSON.
    pub fn into_json(self) -> Value {
        self.0
    }
}

impl From<Value> for Boq {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Falsiness as browser clients understand it: `null`, `false`, `0` and `""`.
///
/// Objects and arrays are never falsy, even when empty.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
