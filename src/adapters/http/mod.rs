//! HTTP adapters - REST API implementations.

mod exchange;
pub mod relay;

pub use exchange::BufferedExchange;
pub use relay::relay_router;
