//! BOQ Relay - AI-backed Bill of Quantities service
//!
//! A thin HTTP relay that accepts product lookups, BOQ generation and BOQ
//! refinement requests, validates them, and forwards each one exactly once to
//! a generative-AI collaborator. A matching HTTP client is provided in
//! [`client`].

pub mod adapters;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
