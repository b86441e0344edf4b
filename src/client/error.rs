//! The single error type surfaced by the API client.

use thiserror::Error;

/// Message used when a failure response body cannot be parsed at all.
pub const UNKNOWN_API_ERROR: &str = "An unknown API error occurred.";

/// Message used when a failure response parses but says nothing.
pub const FAILED_TO_FETCH: &str = "Failed to fetch from the API.";

/// Any failure talking to the relay, reduced to a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Builds the error from the body of a non-OK response.
    pub fn from_failure_body(body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(FAILED_TO_FETCH)
                .to_string(),
            Err(_) => UNKNOWN_API_ERROR.to_string(),
        };

        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new("The request to the API timed out.")
        } else if err.is_connect() {
            Self::new(format!("Could not connect to the API: {}", err))
        } else if err.is_decode() {
            Self::new(format!("Failed to decode the API response: {}", err))
        } else {
            Self::new(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_taken_from_envelope() {
        let err = ApiError::from_failure_body(br#"{"message":"Missing \"requirements\" in request body."}"#);
        assert_eq!(err.message(), "Missing \"requirements\" in request body.");
    }

    #[test]
    fn unparsable_body_uses_unknown_error() {
        let err = ApiError::from_failure_body(b"<html>502 Bad Gateway</html>");
        assert_eq!(err.message(), UNKNOWN_API_ERROR);
    }

    #[test]
    fn empty_body_uses_unknown_error() {
        let err = ApiError::from_failure_body(b"");
        assert_eq!(err.message(), UNKNOWN_API_ERROR);
    }

    #[test]
    fn envelope_without_message_uses_failed_to_fetch() {
        assert_eq!(ApiError::from_failure_body(b"{}").message(), FAILED_TO_FETCH);
        assert_eq!(
            ApiError::from_failure_body(br#"{"message":""}"#).message(),
            FAILED_TO_FETCH
        );
        assert_eq!(
            ApiError::from_failure_body(br#"{"message":42}"#).message(),
            FAILED_TO_FETCH
        );
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(ApiError::new("boom").to_string(), "boom");
    }
}
