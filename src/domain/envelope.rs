//! Request envelopes for the three relay endpoints.
//!
//! Each endpoint accepts exactly one envelope shape. Bodies are validated into
//! these types before anything else happens, so a handler that holds an
//! envelope knows every required field is present and non-empty.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::payload::{is_falsy, Boq};

/// Reasons a request body cannot become an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Request body must be a JSON object.")]
    NotAnObject,

    #[error("{0}")]
    MissingField(&'static str),

    #[error("Field \"{field}\" must be a string.")]
    WrongType { field: &'static str },
}

/// A typed request body.
pub trait RequestEnvelope: Sized + Serialize + Send {
    /// Builds the envelope from an already-parsed JSON object.
    fn from_object(object: &Map<String, Value>) -> Result<Self, EnvelopeError>;

    /// Parses and validates raw body bytes.
    fn from_json(body: &[u8]) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| EnvelopeError::MalformedJson(e.to_string()))?;

        match value {
            Value::Object(object) => Self::from_object(&object),
            _ => Err(EnvelopeError::NotAnObject),
        }
    }
}

/// `{ "productName": string }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductLookupRequest {
    product_name: String,
}

impl ProductLookupRequest {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
        }
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }
}

impl RequestEnvelope for ProductLookupRequest {
    fn from_object(object: &Map<String, Value>) -> Result<Self, EnvelopeError> {
        let product_name = present(object, "productName")
            .ok_or(EnvelopeError::MissingField(
                "Missing \"productName\" in request body.",
            ))?;

        Ok(Self {
            product_name: string_field(product_name, "productName")?,
        })
    }
}

/// `{ "requirements": string }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBoqRequest {
    requirements: String,
}

impl GenerateBoqRequest {
    pub fn new(requirements: impl Into<String>) -> Self {
        Self {
            requirements: requirements.into(),
        }
    }

    pub fn requirements(&self) -> &str {
        &self.requirements
    }
}

impl RequestEnvelope for GenerateBoqRequest {
    fn from_object(object: &Map<String, Value>) -> Result<Self, EnvelopeError> {
        let requirements = present(object, "requirements").ok_or(
            EnvelopeError::MissingField("Missing \"requirements\" in request body."),
        )?;

        Ok(Self {
            requirements: string_field(requirements, "requirements")?,
        })
    }
}

/// `{ "currentBoq": Boq, "refinementPrompt": string }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineBoqRequest {
    current_boq: Boq,
    refinement_prompt: String,
}

impl RefineBoqRequest {
    pub fn new(current_boq: Boq, refinement_prompt: impl Into<String>) -> Self {
        Self {
            current_boq,
            refinement_prompt: refinement_prompt.into(),
        }
    }

    pub fn current_boq(&self) -> &Boq {
        &self.current_boq
    }

    pub fn refinement_prompt(&self) -> &str {
        &self.refinement_prompt
    }
}

impl RequestEnvelope for RefineBoqRequest {
    fn from_object(object: &Map<String, Value>) -> Result<Self, EnvelopeError> {
        let (current_boq, refinement_prompt) =
            match (present(object, "currentBoq"), present(object, "refinementPrompt")) {
                (Some(boq), Some(prompt)) => (boq, prompt),
                _ => {
                    return Err(EnvelopeError::MissingField(
                        "Missing \"currentBoq\" or \"refinementPrompt\" in request body.",
                    ))
                }
            };

        Ok(Self {
            current_boq: Boq::new(current_boq.clone()),
            refinement_prompt: string_field(refinement_prompt, "refinementPrompt")?,
        })
    }
}

/// Failure body shared by every endpoint: `{ "message": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returns the field only when it exists and is not falsy.
fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| !is_falsy(value))
}

fn string_field(value: &Value, field: &'static str) -> Result<String, EnvelopeError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(EnvelopeError::WrongType { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn body(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn product_lookup_parses_name() {
        let req = ProductLookupRequest::from_json(&body(json!({"productName": "steel rebar"})))
            .unwrap();
        assert_eq!(req.product_name(), "steel rebar");
    }

    #[test]
    fn product_lookup_rejects_missing_and_empty_name() {
        let expected = EnvelopeError::MissingField("Missing \"productName\" in request body.");

        for value in [
            json!({}),
            json!({"productName": ""}),
            json!({"productName": null}),
            json!({"productName": false}),
            json!({"productName": 0}),
        ] {
            assert_eq!(
                ProductLookupRequest::from_json(&body(value)),
                Err(expected.clone())
            );
        }
    }

    #[test]
    fn product_lookup_rejects_non_string_name() {
        let err = ProductLookupRequest::from_json(&body(json!({"productName": 42}))).unwrap_err();
        assert_eq!(err, EnvelopeError::WrongType { field: "productName" });
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = GenerateBoqRequest::from_json(b"{not json").unwrap_err();
        assert!(matches!(err, EnvelopeError::MalformedJson(_)));
    }

    #[test]
    fn empty_body_is_malformed() {
        let err = GenerateBoqRequest::from_json(b"").unwrap_err();
        assert!(matches!(err, EnvelopeError::MalformedJson(_)));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = GenerateBoqRequest::from_json(b"[\"requirements\"]").unwrap_err();
        assert_eq!(err, EnvelopeError::NotAnObject);
    }

    #[test]
    fn generate_rejects_missing_requirements() {
        let err = GenerateBoqRequest::from_json(&body(json!({"other": "x"}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing \"requirements\" in request body."
        );
    }

    #[test]
    fn refine_requires_both_fields() {
        let message = "Missing \"currentBoq\" or \"refinementPrompt\" in request body.";

        for value in [
            json!({"currentBoq": {"items": []}}),
            json!({"refinementPrompt": "add tiles"}),
            json!({"currentBoq": null, "refinementPrompt": "add tiles"}),
            json!({"currentBoq": {"items": []}, "refinementPrompt": ""}),
        ] {
            let err = RefineBoqRequest::from_json(&body(value)).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn refine_keeps_boq_untouched() {
        let boq = json!({"items": [{"name": "tile", "quantity": 12, "unit": "m2"}]});
        let req = RefineBoqRequest::from_json(&body(json!({
            "currentBoq": boq.clone(),
            "refinementPrompt": "double the tiles"
        })))
        .unwrap();

        assert_eq!(req.current_boq().as_json(), &boq);
        assert_eq!(req.refinement_prompt(), "double the tiles");
    }

    #[test]
    fn envelopes_serialize_with_camel_case_keys() {
        let req = RefineBoqRequest::new(Boq::new(json!({"items": []})), "more");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"currentBoq": {"items": []}, "refinementPrompt": "more"})
        );

        let req = ProductLookupRequest::new("cement");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"productName": "cement"})
        );
    }

    proptest! {
        #[test]
        fn any_non_empty_requirements_are_accepted(text in ".+") {
            let req = GenerateBoqRequest::from_json(&body(json!({"requirements": text.clone()})))
                .unwrap();
            prop_assert_eq!(req.requirements(), text.as_str());
        }

        #[test]
        fn unrelated_keys_are_ignored(extra in "[a-z]{1,8}", name in "[a-zA-Z ]{1,20}") {
            prop_assume!(extra != "productName");
            let req = ProductLookupRequest::from_json(&body(json!({
                "productName": name.clone(),
                extra: "ignored",
            })))
            .unwrap();
            prop_assert_eq!(req.product_name(), name.as_str());
        }
    }
}
