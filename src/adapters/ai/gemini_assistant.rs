//! Gemini Assistant - Implementation of BoqAssistant on Google's Gemini API.
//!
//! Every operation is a single non-streaming `generateContent` call whose
//! text output is decoded as JSON. Product lookups turn on Google Search
//! grounding; BOQ calls ask for a JSON response MIME type instead, since the
//! API does not allow both at once.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let assistant = GeminiAssistant::new(config);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use super::prompts;
use crate::domain::{Boq, ProductDetails};
use crate::ports::{AssistantError, BoqAssistant};

/// Default Gemini REST endpoint.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini assistant.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: SecretString,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: "gemini-2.5-flash".to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Which extra capability a call needs from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallMode {
    /// Google Search grounding; output is free text that should contain JSON.
    Grounded,
    /// JSON response MIME type.
    Json,
}

/// Gemini-backed AI collaborator.
pub struct GeminiAssistant {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAssistant {
    /// Creates a new assistant with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(prompt: String, mode: CallMode) -> GenerateContentRequest {
        let (tools, response_mime_type) = match mode {
            CallMode::Grounded => (
                Some(vec![Tool {
                    google_search: GoogleSearch {},
                }]),
                None,
            ),
            CallMode::Json => (None, Some("application/json".to_string())),
        };

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompts::SYSTEM_INSTRUCTION.to_string()),
                }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.2),
                response_mime_type,
            }),
            tools,
        }
    }

    /// Sends one request and decodes the model's JSON answer.
    async fn generate_json(&self, prompt: String, mode: CallMode) -> Result<Value, AssistantError> {
        let request = Self::build_request(prompt, mode);

        tracing::debug!(
            model = %self.config.model,
            grounded = mode == CallMode::Grounded,
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::network(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    AssistantError::network(format!("Connection failed: {}", e))
                } else {
                    AssistantError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::parse(format!("Failed to parse response: {}", e)))?;

        let text = response_text(api_response)?;
        extract_json(&text)
    }
}

#[async_trait]
impl BoqAssistant for GeminiAssistant {
    async fn fetch_product_details(
        &self,
        product_name: &str,
    ) -> Result<ProductDetails, AssistantError> {
        self.generate_json(prompts::product_details(product_name), CallMode::Grounded)
            .await
            .map(ProductDetails::new)
    }

    async fn generate_boq(&self, requirements: &str) -> Result<Boq, AssistantError> {
        self.generate_json(prompts::generate_boq(requirements), CallMode::Json)
            .await
            .map(Boq::new)
    }

    async fn refine_boq(
        &self,
        current_boq: &Boq,
        refinement_prompt: &str,
    ) -> Result<Boq, AssistantError> {
        self.generate_json(
            prompts::refine_boq(current_boq, refinement_prompt),
            CallMode::Json,
        )
        .await
        .map(Boq::new)
    }
}

/// Maps a non-success HTTP status to an assistant error.
fn status_error(status: u16, body: &str) -> AssistantError {
    if status == 429 {
        return AssistantError::RateLimited;
    }

    // Gemini wraps failures as {"error": {"code", "message", "status"}}
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.trim().to_string());

    AssistantError::api(status, message)
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: GenerateContentResponse) -> Result<String, AssistantError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(AssistantError::ContentFiltered(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(AssistantError::EmptyResponse)?;

    if let Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) =
        candidate.finish_reason.as_deref()
    {
        return Err(AssistantError::ContentFiltered(reason.to_string()));
    }

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AssistantError::EmptyResponse);
    }

    Ok(text)
}

/// Decodes model output as JSON, tolerating markdown fences and prose around it.
fn extract_json(text: &str) -> Result<Value, AssistantError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .map(str::trim);
    if let Some(inner) = unfenced {
        if let Ok(value) = serde_json::from_str(inner) {
            return Ok(value);
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&trimmed[start..=end])
            .map_err(|e| AssistantError::parse(e.to_string())),
        _ => Err(AssistantError::parse("response did not contain a JSON object")),
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
