//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the relay and the outside world. Adapters implement these ports.
//!
//! - `BoqAssistant` - The generative-AI collaborator
//! - `Exchange` - One request/response pair as seen by a relay handler

mod boq_assistant;
mod exchange;

pub use boq_assistant::{AssistantError, BoqAssistant};
pub use exchange::Exchange;
