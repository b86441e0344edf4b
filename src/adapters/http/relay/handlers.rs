//! HTTP handlers for the relay endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::Method,
    response::{IntoResponse, Response},
};

use crate::adapters::http::BufferedExchange;
use crate::application::handlers::relay::{RelayHandler, RelayOperation};

/// Any method on a relay route.
///
/// Method and body checks live in [`RelayHandler`], so this only moves bytes
/// in and out of a [`BufferedExchange`]. A body axum could not buffer still
/// gets the relay's own error envelope.
pub async fn relay<O: RelayOperation>(
    State(handler): State<Arc<RelayHandler<O>>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => {
            let mut exchange = BufferedExchange::new(method, body.to_vec());
            handler.handle(&mut exchange).await;
            exchange.into_response()
        }
        Err(rejection) => {
            let mut exchange = BufferedExchange::new(method, Vec::new());
            handler.reject_unreadable_body(&mut exchange, &rejection.body_text());
            exchange.into_response()
        }
    }
}
