//! The three relayed operations.
//!
//! Each operation ties together a route, the request envelope it accepts,
//! the payload it returns, and the collaborator call that produces it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    Boq, GenerateBoqRequest, ProductDetails, ProductLookupRequest, RefineBoqRequest,
    RequestEnvelope,
};
use crate::ports::{AssistantError, BoqAssistant};

/// A single request/response contract relayed to the AI collaborator.
#[async_trait]
pub trait RelayOperation: Send + Sync + 'static {
    /// Path the operation is served under.
    const ROUTE: &'static str;

    /// Validated request body.
    type Request: RequestEnvelope;

    /// Success payload, relayed verbatim.
    type Payload: Serialize + DeserializeOwned + Send;

    /// Invokes the collaborator once.
    async fn invoke(
        &self,
        assistant: &dyn BoqAssistant,
        request: Self::Request,
    ) -> Result<Self::Payload, AssistantError>;
}

/// Product lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchProductDetails;

#[async_trait]
impl RelayOperation for FetchProductDetails {
    const ROUTE: &'static str = "/api/fetch-product-details";
    type Request = ProductLookupRequest;
    type Payload = ProductDetails;

    async fn invoke(
        &self,
        assistant: &dyn BoqAssistant,
        request: ProductLookupRequest,
    ) -> Result<ProductDetails, AssistantError> {
        assistant.fetch_product_details(request.product_name()).await
    }
}

/// BOQ generation from free-text requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateBoq;

#[async_trait]
impl RelayOperation for GenerateBoq {
    const ROUTE: &'static str = "/api/generate-boq";
    type Request = GenerateBoqRequest;
    type Payload = Boq;

    async fn invoke(
        &self,
        assistant: &dyn BoqAssistant,
        request: GenerateBoqRequest,
    ) -> Result<Boq, AssistantError> {
        assistant.generate_boq(request.requirements()).await
    }
}

/// BOQ refinement of an existing bill.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefineBoq;

#[async_trait]
impl RelayOperation for RefineBoq {
    const ROUTE: &'static str = "/api/refine-boq";
    type Request = RefineBoqRequest;
    type Payload = Boq;

    async fn invoke(
        &self,
        assistant: &dyn BoqAssistant,
        request: RefineBoqRequest,
    ) -> Result<Boq, AssistantError> {
        assistant
            .refine_boq(request.current_boq(), request.refinement_prompt())
            .await
    }
}
