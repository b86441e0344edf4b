//! Axum router configuration for the relay endpoints.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::any, Router};

use super::handlers::relay;
use crate::application::handlers::relay::{
    FetchProductDetails, GenerateBoq, RefineBoq, RelayHandler, RelayOperation,
};
use crate::ports::BoqAssistant;

/// Largest request body the relay will buffer. A refinement carries a whole BOQ.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Create the relay router.
///
/// # Routes
///
/// - `POST /api/fetch-product-details` - `{ productName }` to product details
/// - `POST /api/generate-boq` - `{ requirements }` to a BOQ
/// - `POST /api/refine-boq` - `{ currentBoq, refinementPrompt }` to a BOQ
///
/// Every method is routed so that the handler can answer 405 with `Allow: POST`.
/// Bodies over [`MAX_BODY_BYTES`] get an enveloped 400.
pub fn relay_router(assistant: Arc<dyn BoqAssistant>) -> Router {
    Router::new()
        .merge(operation_route(FetchProductDetails, assistant.clone()))
        .merge(operation_route(GenerateBoq, assistant.clone()))
        .merge(operation_route(RefineBoq, assistant))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

fn operation_route<O: RelayOperation>(operation: O, assistant: Arc<dyn BoqAssistant>) -> Router {
    let handler = Arc::new(RelayHandler::new(operation, assistant));
    Router::new()
        .route(O::ROUTE, any(relay::<O>))
        .with_state(handler)
}
