//! RelayHandler - Validates a request, calls the collaborator, writes the reply.

use std::sync::Arc;

use http::{header, HeaderValue, Method, StatusCode};

use crate::domain::{ErrorEnvelope, RequestEnvelope};
use crate::ports::{BoqAssistant, Exchange};

use super::error::RelayError;
use super::operation::RelayOperation;

/// Handler for one relayed operation.
///
/// Per request: received, validated, awaiting the collaborator, responded.
/// Validation failures respond before the collaborator is touched, and the
/// collaborator is never called more than once.
pub struct RelayHandler<O: RelayOperation> {
    operation: O,
    assistant: Arc<dyn BoqAssistant>,
}

impl<O: RelayOperation> RelayHandler<O> {
    pub fn new(operation: O, assistant: Arc<dyn BoqAssistant>) -> Self {
        Self {
            operation,
            assistant,
        }
    }

    /// Runs the relay contract and returns the typed outcome.
    pub async fn process(&self, method: &Method, body: &[u8]) -> Result<O::Payload, RelayError> {
        check_method(method)?;

        let request = O::Request::from_json(body).map_err(|e| {
            tracing::debug!(route = O::ROUTE, error = %e, "Rejected request body");
            RelayError::InvalidRequest(e.to_string())
        })?;

        self.operation
            .invoke(self.assistant.as_ref(), request)
            .await
            .map_err(|e| {
                tracing::error!(route = O::ROUTE, error = %e, "Error in {}", O::ROUTE);
                RelayError::CollaboratorFailure(e.description())
            })
    }

    /// Runs the relay contract against an exchange and writes the response.
    pub async fn handle<E: Exchange>(&self, exchange: &mut E) {
        let outcome = self.process(exchange.method(), exchange.body()).await;

        let serialized = outcome.and_then(|payload| {
            serde_json::to_value(&payload).map_err(|e| {
                tracing::error!(route = O::ROUTE, error = %e, "Failed to serialize payload");
                RelayError::CollaboratorFailure(None)
            })
        });

        match serialized {
            Ok(body) => {
                exchange.set_status(StatusCode::OK);
                exchange.write_json(body);
            }
            Err(error) => write_error(exchange, &error),
        }
    }

    /// Answers a request whose body could not be read, e.g. over the size limit.
    ///
    /// The method check still runs first, so a non-POST gets 405 either way.
    pub fn reject_unreadable_body<E: Exchange>(&self, exchange: &mut E, reason: &str) {
        let error = match check_method(exchange.method()) {
            Err(error) => error,
            Ok(()) => {
                tracing::debug!(route = O::ROUTE, %reason, "Could not read request body");
                RelayError::InvalidRequest(format!("Request body could not be read: {}", reason))
            }
        };

        write_error(exchange, &error);
    }
}

fn check_method(method: &Method) -> Result<(), RelayError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(RelayError::MethodNotAllowed {
            method: method.clone(),
        })
    }
}

fn write_error<E: Exchange>(exchange: &mut E, error: &RelayError) {
    if let Some(methods) = error.allowed_methods() {
        let allow = methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if let Ok(value) = HeaderValue::from_str(&allow) {
            exchange.set_header(header::ALLOW, value);
        }
    }

    let body = ErrorEnvelope::new(error.to_string());
    exchange.set_status(error.status());
    exchange.write_json(serde_json::to_value(&body).unwrap_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAssistant;
    use crate::adapters::http::BufferedExchange;
    use crate::application::handlers::relay::{FetchProductDetails, GenerateBoq, RefineBoq};
    use crate::ports::AssistantError;
    use serde_json::{json, Value};

    fn post(body: Value) -> BufferedExchange {
        BufferedExchange::new(Method::POST, serde_json::to_vec(&body).unwrap())
    }

    // ───────────────────────────────────────────────────────────────
    // Method checks
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn non_post_is_rejected_on_every_operation() {
        let assistant = Arc::new(MockAssistant::new());

        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            let mut exchange = BufferedExchange::new(method.clone(), Vec::new());
            RelayHandler::new(FetchProductDetails, assistant.clone())
                .handle(&mut exchange)
                .await;
            assert_eq!(exchange.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(exchange.header(header::ALLOW).unwrap(), "POST");
            assert_eq!(
                exchange.json()["message"],
                format!("Method {} Not Allowed", method)
            );

            let mut exchange = BufferedExchange::new(method.clone(), Vec::new());
            RelayHandler::new(GenerateBoq, assistant.clone())
                .handle(&mut exchange)
                .await;
            assert_eq!(exchange.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(exchange.header(header::ALLOW).unwrap(), "POST");

            let mut exchange = BufferedExchange::new(method, Vec::new());
            RelayHandler::new(RefineBoq, assistant.clone())
                .handle(&mut exchange)
                .await;
            assert_eq!(exchange.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(exchange.header(header::ALLOW).unwrap(), "POST");
        }

        assert_eq!(assistant.call_count(), 0);
    }

    // ───────────────────────────────────────────────────────────────
    // Validation
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_fields_never_reach_the_collaborator() {
        let assistant = Arc::new(MockAssistant::new());

        let mut exchange = post(json!({}));
        RelayHandler::new(FetchProductDetails, assistant.clone())
            .handle(&mut exchange)
            .await;
        assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            exchange.json()["message"],
            "Missing \"productName\" in request body."
        );

        let mut exchange = post(json!({"requirements": ""}));
        RelayHandler::new(GenerateBoq, assistant.clone())
            .handle(&mut exchange)
            .await;
        assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            exchange.json()["message"],
            "Missing \"requirements\" in request body."
        );

        let mut exchange = post(json!({"currentBoq": {"items": []}}));
        RelayHandler::new(RefineBoq, assistant.clone())
            .handle(&mut exchange)
            .await;
        assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            exchange.json()["message"],
            "Missing \"currentBoq\" or \"refinementPrompt\" in request body."
        );

        assert_eq!(assistant.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let assistant = Arc::new(MockAssistant::new());
        let handler = RelayHandler::new(GenerateBoq, assistant.clone());

        let mut exchange = BufferedExchange::new(Method::POST, b"{\"requirements\":".to_vec());
        handler.handle(&mut exchange).await;

        assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
        assert!(exchange.json()["message"]
            .as_str()
            .unwrap()
            .starts_with("Request body is not valid JSON"));
        assert_eq!(assistant.call_count(), 0);
    }

    // ───────────────────────────────────────────────────────────────
    // Collaborator outcomes
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn product_lookup_relays_payload_verbatim() {
        let payload = json!({"name": "steel rebar", "unit": "kg", "category": "structural"});
        let assistant = Arc::new(MockAssistant::new().with_response(payload.clone()));
        let handler = RelayHandler::new(FetchProductDetails, assistant.clone());

        let mut exchange = post(json!({"productName": "steel rebar"}));
        handler.handle(&mut exchange).await;

        assert_eq!(exchange.status(), StatusCode::OK);
        assert_eq!(exchange.json(), payload);
        assert_eq!(assistant.call_count(), 1);
    }

    #[tokio::test]
    async fn refine_passes_both_fields_to_the_collaborator() {
        let refined = json!({"items": [{"name": "tile", "quantity": 24}]});
        let assistant = Arc::new(MockAssistant::new().with_response(refined.clone()));
        let handler = RelayHandler::new(RefineBoq, assistant.clone());

        let current = json!({"items": [{"name": "tile", "quantity": 12}]});
        let mut exchange = post(json!({
            "currentBoq": current.clone(),
            "refinementPrompt": "double the tiles"
        }));
        handler.handle(&mut exchange).await;

        assert_eq!(exchange.status(), StatusCode::OK);
        assert_eq!(exchange.json(), refined);

        let calls = assistant.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            crate::adapters::ai::MockCall::RefineBoq {
                current_boq: current,
                refinement_prompt: "double the tiles".to_string(),
            }
        );
    }

    async fn run<O: RelayOperation>(
        operation: O,
        assistant: Arc<MockAssistant>,
        body: Value,
    ) -> BufferedExchange {
        let mut exchange = post(body);
        RelayHandler::new(operation, assistant)
            .handle(&mut exchange)
            .await;
        exchange
    }

    /// Runs every operation with a valid body against a fresh mock holding `error`.
    async fn fail_every_operation(error: AssistantError) -> Vec<BufferedExchange> {
        let failing = || Arc::new(MockAssistant::new().with_error(error.clone()));

        vec![
            run(
                FetchProductDetails,
                failing(),
                json!({"productName": "cement"}),
            )
            .await,
            run(GenerateBoq, failing(), json!({"requirements": "two bedrooms"})).await,
            run(
                RefineBoq,
                failing(),
                json!({"currentBoq": {"items": []}, "refinementPrompt": "add doors"}),
            )
            .await,
        ]
    }

    #[tokio::test]
    async fn collaborator_failure_message_is_relayed_on_every_operation() {
        for exchange in fail_every_operation(AssistantError::failed("X")).await {
            assert_eq!(exchange.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(exchange.json(), json!({"message": "X"}));
            assert_eq!(exchange.header(header::ALLOW), None);
        }
    }

    #[tokio::test]
    async fn undescribed_failure_uses_fallback_on_every_operation() {
        for exchange in fail_every_operation(AssistantError::Unspecified).await {
            assert_eq!(exchange.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                exchange.json(),
                json!({"message": "An unexpected error occurred."})
            );
        }
    }

    #[tokio::test]
    async fn unreadable_body_is_a_bad_request_after_method_check() {
        let handler = RelayHandler::new(RefineBoq, Arc::new(MockAssistant::new()));

        let mut exchange = BufferedExchange::new(Method::POST, Vec::new());
        handler.reject_unreadable_body(&mut exchange, "length limit exceeded");
        assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            exchange.json(),
            json!({"message": "Request body could not be read: length limit exceeded"})
        );

        let mut exchange = BufferedExchange::new(Method::DELETE, Vec::new());
        handler.reject_unreadable_body(&mut exchange, "length limit exceeded");
        assert_eq!(exchange.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(exchange.header(header::ALLOW).unwrap(), "POST");
    }

    #[tokio::test]
    async fn failures_are_not_retried() {
        let assistant = Arc::new(
            MockAssistant::new()
                .with_error(AssistantError::network("connection reset"))
                .with_response(json!({"items": []})),
        );
        let handler = RelayHandler::new(GenerateBoq, assistant.clone());

        let result = handler
            .process(&Method::POST, br#"{"requirements":"kitchen"}"#)
            .await;

        assert_eq!(
            result,
            Err(RelayError::CollaboratorFailure(Some(
                "network error: connection reset".to_string()
            )))
        );
        assert_eq!(assistant.call_count(), 1);
    }
}
