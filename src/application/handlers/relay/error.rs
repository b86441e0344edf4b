//! Relay error taxonomy and its mapping onto HTTP.

use http::{Method, StatusCode};
use thiserror::Error;

/// Message used when a collaborator failure has nothing to say for itself.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Why a relay request did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Anything other than `POST`.
    #[error("Method {method} Not Allowed")]
    MethodNotAllowed { method: Method },

    /// Malformed JSON or a missing required field.
    #[error("{0}")]
    InvalidRequest(String),

    /// The AI collaborator failed. Carries its description, if any.
    #[error("{}", .0.as_deref().unwrap_or(UNEXPECTED_ERROR_MESSAGE))]
    CollaboratorFailure(Option<String>),
}

impl RelayError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::CollaboratorFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Methods the endpoint does accept, when the error is about the method.
    pub fn allowed_methods(&self) -> Option<Vec<Method>> {
        match self {
            Self::MethodNotAllowed { .. } => Some(vec![Method::POST]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_not_allowed_maps_to_405_with_post_allowed() {
        let error = RelayError::MethodNotAllowed {
            method: Method::GET,
        };
        assert_eq!(error.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error.allowed_methods(), Some(vec![Method::POST]));
        assert_eq!(error.to_string(), "Method GET Not Allowed");
    }

    #[test]
    fn invalid_request_maps_to_400() {
        let error = RelayError::InvalidRequest("Missing \"requirements\" in request body.".into());
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.allowed_methods(), None);
    }

    #[test]
    fn collaborator_failure_without_description_uses_fallback() {
        let error = RelayError::CollaboratorFailure(None);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn collaborator_failure_keeps_description() {
        let error = RelayError::CollaboratorFailure(Some("quota exhausted".into()));
        assert_eq!(error.to_string(), "quota exhausted");
    }
}
