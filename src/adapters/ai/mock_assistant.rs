//! Mock BOQ Assistant for testing and local development.
//!
//! Provides a configurable implementation of the BoqAssistant port so that
//! the relay can run without calling a real AI service.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection
//! - Simulated latency
//! - Call tracking for verification, capped at [`MAX_RECORDED_CALLS`]
//!
//! When no response is queued the mock echoes the request envelope back as
//! the payload, e.g. `generate_boq("r")` yields `{"requirements": "r"}`.
//!
//! # Example
//!
//! ```ignore
//! let assistant = MockAssistant::new()
//!     .with_response(json!({"name": "steel rebar", "unit": "kg"}))
//!     .with_delay(Duration::from_millis(100));
//!
//! let details = assistant.fetch_product_details("steel rebar").await?;
//! assert_eq!(assistant.call_count(), 1);
//! ```

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::{Boq, ProductDetails};
use crate::ports::{AssistantError, BoqAssistant};

/// Call history kept per mock; older calls are dropped first.
pub const MAX_RECORDED_CALLS: usize = 1024;

/// Mock AI collaborator.
#[derive(Debug, Clone, Default)]
pub struct MockAssistant {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Most recent calls, oldest first.
    calls: Arc<Mutex<VecDeque<MockCall>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this JSON as the payload.
    Success(Value),
    /// Fail with this error.
    Error(AssistantError),
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    FetchProductDetails {
        product_name: String,
    },
    GenerateBoq {
        requirements: String,
    },
    RefineBoq {
        current_boq: Value,
        refinement_prompt: String,
    },
}

impl MockCall {
    /// The request envelope this call corresponds to.
    fn echo(&self) -> Value {
        match self {
            Self::FetchProductDetails { product_name } => json!({ "productName": product_name }),
            Self::GenerateBoq { requirements } => json!({ "requirements": requirements }),
            Self::RefineBoq {
                current_boq,
                refinement_prompt,
            } => json!({
                "currentBoq": current_boq,
                "refinementPrompt": refinement_prompt,
            }),
        }
    }
}

impl MockAssistant {
    /// Creates a new mock that echoes requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, payload: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(payload));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AssistantError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().iter().cloned().collect()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Records the call, waits, and resolves the next response.
    async fn respond(&self, call: MockCall) -> Result<Value, AssistantError> {
        let echo = call.echo();
        {
            let mut calls = self.calls.lock().unwrap();
            if calls.len() == MAX_RECORDED_CALLS {
                calls.pop_front();
            }
            calls.push_back(call);
        }

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(payload)) => Ok(payload),
            Some(MockResponse::Error(error)) => Err(error),
            None => Ok(echo),
        }
    }
}

#[async_trait]
impl BoqAssistant for MockAssistant {
    async fn fetch_product_details(
        &self,
        product_name: &str,
    ) -> Result<ProductDetails, AssistantError> {
        self.respond(MockCall::FetchProductDetails {
            product_name: product_name.to_string(),
        })
        .await
        .map(ProductDetails::new)
    }

    async fn generate_boq(&self, requirements: &str) -> Result<Boq, AssistantError> {
        self.respond(MockCall::GenerateBoq {
            requirements: requirements.to_string(),
        })
        .await
        .map(Boq::new)
    }

    async fn refine_boq(
        &self,
        current_boq: &Boq,
        refinement_prompt: &str,
    ) -> Result<Boq, AssistantError> {
        self.respond(MockCall::RefineBoq {
            current_boq: current_boq.as_json().clone(),
            refinement_prompt: refinement_prompt.to_string(),
        })
        .await
        .map(Boq::new)
    }
}
