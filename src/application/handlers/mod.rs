//! Application handlers.

pub mod relay;

pub use relay::{
    FetchProductDetails, GenerateBoq, RefineBoq, RelayError, RelayHandler, RelayOperation,
};
