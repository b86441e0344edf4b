//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - BOQ assistants (Gemini, mock)
//! - `http` - axum routes and the buffered exchange

pub mod ai;
pub mod http;
