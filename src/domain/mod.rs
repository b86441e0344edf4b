//! Domain layer containing the relay's data types.
//!
//! # Module Organization
//!
//! - `payload` - Opaque collaborator payloads (product details, BOQ)
//! - `envelope` - Request and error envelopes with validation rules

mod envelope;
mod payload;

pub use envelope::{
    EnvelopeError, ErrorEnvelope, GenerateBoqRequest, ProductLookupRequest, RefineBoqRequest,
    RequestEnvelope,
};
pub use payload::{Boq, ProductDetails};
