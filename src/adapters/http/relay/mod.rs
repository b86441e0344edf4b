//! Relay HTTP adapter - REST endpoints in front of the AI collaborator.
//!
//! Provides endpoints for:
//! - Product lookup
//! - BOQ generation
//! - BOQ refinement

pub mod handlers;
pub mod routes;

pub use routes::{relay_router, MAX_BODY_BYTES};
