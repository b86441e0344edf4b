//! Relay handlers - forward validated requests to the AI collaborator.

mod error;
mod handler;
mod operation;

pub use error::{RelayError, UNEXPECTED_ERROR_MESSAGE};
pub use handler::RelayHandler;
pub use operation::{FetchProductDetails, GenerateBoq, RefineBoq, RelayOperation};
