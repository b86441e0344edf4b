//! BOQ Assistant Port - Interface to the generative-AI collaborator.
//!
//! The relay knows nothing about prompts, models or providers. It hands the
//! validated request fields to an implementation of this port and relays
//! whatever comes back.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedAssistant;
//!
//! #[async_trait]
//! impl BoqAssistant for FixedAssistant {
//!     async fn generate_boq(&self, _requirements: &str) -> Result<Boq, AssistantError> {
//!         Ok(Boq::new(serde_json::json!({ "items": [] })))
//!     }
//!     // ... other methods
//! }
//! ```

use async_trait::async_trait;

use crate::domain::{Boq, ProductDetails};

/// Port for the remote AI service.
///
/// Implementations are expected to be slow and network-bound. Each method is
/// called at most once per incoming request.
#[async_trait]
pub trait BoqAssistant: Send + Sync {
    /// Look up structured details for a named product.
    async fn fetch_product_details(
        &self,
        product_name: &str,
    ) -> Result<ProductDetails, AssistantError>;

    /// Produce a Bill of Quantities from free-text project requirements.
    async fn generate_boq(&self, requirements: &str) -> Result<Boq, AssistantError>;

    /// Produce a revised Bill of Quantities from an existing one and an instruction.
    async fn refine_boq(
        &self,
        current_boq: &Boq,
        refinement_prompt: &str,
    ) -> Result<Boq, AssistantError>;
}

/// Failures reported by the AI collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// The provider could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("AI service error {status}: {message}")]
    Api {
        /// HTTP status returned by the provider.
        status: u16,
        /// Error text from the provider.
        message: String,
    },

    /// The provider is throttling requests.
    #[error("AI service rate limit reached, try again later")]
    RateLimited,

    /// The provider refused to answer for safety reasons.
    #[error("AI service blocked the response: {0}")]
    ContentFiltered(String),

    /// The model answered but its output was not the expected JSON.
    #[error("could not parse AI response: {0}")]
    Parse(String),

    /// The model produced no usable output.
    #[error("AI service returned an empty response")]
    EmptyResponse,

    /// Any other failure, described in free text.
    #[error("{0}")]
    Failed(String),

    /// Failure that carries no description.
    #[error("unspecified AI service failure")]
    Unspecified,
}

impl AssistantError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a free-text failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Human-readable description safe to show to callers.
    ///
    /// `None` when the failure has nothing meaningful to say, in which case the
    /// relay substitutes its generic fallback.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Unspecified => None,
            Self::Network(m) | Self::ContentFiltered(m) | Self::Parse(m) | Self::Failed(m)
                if m.trim().is_empty() =>
            {
                None
            }
            Self::Api { message, .. } if message.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}
