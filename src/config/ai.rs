//! AI collaborator configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{GeminiConfig, GEMINI_API_BASE};

/// AI collaborator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which collaborator serves the relay
    #[serde(default)]
    pub backend: AssistantBackend,

    /// Gemini API key
    pub gemini_api_key: Option<SecretString>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AI collaborator type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssistantBackend {
    #[default]
    Gemini,
    /// Echoes requests back; for local development without a key.
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Build the Gemini adapter configuration, if a key is present
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        if !self.has_gemini_key() {
            return None;
        }

        self.gemini_api_key.clone().map(|key| {
            GeminiConfig::new(key)
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout())
        })
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == AssistantBackend::Gemini && !self.has_gemini_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }

        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }

        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: AssistantBackend::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    GEMINI_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    120
}
