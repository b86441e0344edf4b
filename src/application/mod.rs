//! Application layer - Handlers.
//!
//! This layer orchestrates a request between the HTTP edge and the
//! collaborator port.

pub mod handlers;
