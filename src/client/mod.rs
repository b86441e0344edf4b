//! Client for the relay endpoints.
//!
//! Mirrors the three relay operations with typed arguments and payloads.
//! Every failure, whether the relay answered with an error or the request
//! never completed, comes back as an [`ApiError`] carrying only a message.
//!
//! # Example
//!
//! ```no_run
//! use boq_relay::client::{ApiClientConfig, BoqApiClient};
//!
//! # async fn run() -> Result<(), boq_relay::client::ApiError> {
//! let client = BoqApiClient::new(ApiClientConfig::new("http://localhost:8080"))?;
//! let boq = client.generate_boq("Two classrooms with projectors").await?;
//! println!("{}", boq.as_json());
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::{ApiError, FAILED_TO_FETCH, UNKNOWN_API_ERROR};

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};

use crate::application::handlers::relay::{
    FetchProductDetails, GenerateBoq, RefineBoq, RelayOperation,
};
use crate::domain::{
    Boq, GenerateBoqRequest, ProductDetails, ProductLookupRequest, RefineBoqRequest,
};

/// Where the relay lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL the relay routes are appended to.
    pub base_url: String,
    /// Optional whole-request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client for the relay.
#[derive(Debug, Clone)]
pub struct BoqApiClient {
    base_url: String,
    client: Client,
}

impl BoqApiClient {
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Fetches product details for a product name.
    pub async fn fetch_product_details(
        &self,
        product_name: &str,
    ) -> Result<ProductDetails, ApiError> {
        self.call::<FetchProductDetails>(&ProductLookupRequest::new(product_name))
            .await
    }

    /// Generates a BOQ from project requirements.
    pub async fn generate_boq(&self, requirements: &str) -> Result<Boq, ApiError> {
        self.call::<GenerateBoq>(&GenerateBoqRequest::new(requirements))
            .await
    }

    /// Refines an existing BOQ.
    pub async fn refine_boq(
        &self,
        current_boq: &Boq,
        refinement_prompt: &str,
    ) -> Result<Boq, ApiError> {
        self.call::<RefineBoq>(&RefineBoqRequest::new(
            current_boq.clone(),
            refinement_prompt,
        ))
        .await
    }

    /// Posts an envelope to an operation's route and decodes its payload.
    pub async fn call<O: RelayOperation>(
        &self,
        request: &O::Request,
    ) -> Result<O::Payload, ApiError> {
        let url = format!("{}{}", self.base_url, O::ROUTE);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.bytes().await.unwrap_or_default();
            let error = ApiError::from_failure_body(&body);
            tracing::debug!(%url, %status, message = error.message(), "API request failed");
            return Err(error);
        }

        Ok(response.json::<O::Payload>().await?)
    }
}
