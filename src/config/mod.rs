//! Relay configuration, read from `BOQ_RELAY__*` environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs. Section
//! and key are separated by a double underscore:
//!
//! | Variable | Field |
//! |---|---|
//! | `BOQ_RELAY__SERVER__PORT` | `server.port` |
//! | `BOQ_RELAY__SERVER__CORS_ORIGINS` | `server.cors_origins` |
//! | `BOQ_RELAY__AI__BACKEND` | `ai.backend` (`gemini` or `mock`) |
//! | `BOQ_RELAY__AI__GEMINI_API_KEY` | `ai.gemini_api_key` |
//!
//! ```no_run
//! use boq_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod server;

pub use ai::{AiConfig, AssistantBackend};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "BOQ_RELAY";

/// Everything the `boq-relay` binary needs to start.
///
/// Every field has a default, so loading only fails on unparsable values.
/// Whether the result is usable is decided by [`AppConfig::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks the listener and that the chosen assistant can be built.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
