//! AI Assistant Adapters.
//!
//! Implementations of the BoqAssistant port.
//!
//! ## Available Adapters
//!
//! - `GeminiAssistant` - Google Gemini `generateContent` REST API
//! - `MockAssistant` - Configurable mock for testing and local runs

mod gemini_assistant;
mod mock_assistant;
mod prompts;

pub use gemini_assistant::{GeminiAssistant, GeminiConfig, GEMINI_API_BASE};
pub use mock_assistant::{MockAssistant, MockCall, MockResponse, MAX_RECORDED_CALLS};
