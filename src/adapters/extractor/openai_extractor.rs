//! OpenAI Slot Extractor - LLM-backed criteria recovery.
//!
//! Sends the utterance to the chat completions endpoint in JSON mode and
//! reads back `{brand, type, budgetMin, budgetMax}`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIExtractorConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let extractor = OpenAISlotExtractor::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::browse::{BudgetRange, ExtractedSlots};
use crate::ports::{SlotExtractionError, SlotExtractor};

const SYSTEM_PROMPT: &str = "You extract car search filters from a customer's message to a used-car dealership. \
Reply with a JSON object with exactly these keys: \
\"brand\" (manufacturer name or null), \
\"type\" (one of SUV, Sedan, Hatchback, Coupe, Convertible, Wagon, Pickup, MUV, or null), \
\"budgetMin\" and \"budgetMax\" (rupee amounts as numbers, or null). \
1 lakh is 100000 rupees and 1 crore is 10000000 rupees. \
Use null for anything the message does not state.";

/// Configuration for the OpenAI extractor.
#[derive(Debug, Clone)]
pub struct OpenAIExtractorConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIExtractorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Slot extractor backed by OpenAI chat completions.
pub struct OpenAISlotExtractor {
    config: OpenAIExtractorConfig,
    client: Client,
}

impl OpenAISlotExtractor {
    pub fn new(config: OpenAIExtractorConfig) -> Result<Self, SlotExtractionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SlotExtractionError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, text: &str) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        }
    }

    async fn send_request(&self, text: &str) -> Result<Response, SlotExtractionError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&self.to_openai_request(text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SlotExtractionError::Network(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    SlotExtractionError::Network(format!("Connection failed: {}", e))
                } else {
                    SlotExtractionError::Network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, SlotExtractionError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            401 | 403 => SlotExtractionError::Unavailable("authentication failed".to_string()),
            429 => SlotExtractionError::RateLimited,
            500..=599 => {
                SlotExtractionError::Unavailable(format!("Server error {}: {}", status, error_body))
            }
            _ => SlotExtractionError::Network(format!("Unexpected status {}: {}", status, error_body)),
        })
    }
}

/// Reads the slots out of a completion's message content.
fn parse_slots(content: &str) -> Result<ExtractedSlots, SlotExtractionError> {
    let raw: LlmSlots = serde_json::from_str(content.trim())
        .map_err(|e| SlotExtractionError::InvalidResponse(e.to_string()))?;

    let budget = BudgetRange::new(rupees(raw.budget_min), rupees(raw.budget_max));

    Ok(ExtractedSlots {
        brand: meaningful(raw.brand),
        car_type: meaningful(raw.car_type),
        budget: budget.is_stated().then_some(budget),
    })
}

/// Drops blanks and the literal strings models use for "nothing".
fn meaningful(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !matches!(v.to_lowercase().as_str(), "null" | "none" | "any"))
}

fn rupees(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
}

#[async_trait]
impl SlotExtractor for OpenAISlotExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedSlots, SlotExtractionError> {
        let response = self.send_request(text).await?;
        let response = self.handle_response_status(response).await?;

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| SlotExtractionError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SlotExtractionError::InvalidResponse("No choices in response".to_string()))?;

        parse_slots(&choice.message.content)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct LlmSlots {
    #[serde(default)]
    brand: Option<String>,
    #[serde(default, rename = "type")]
    car_type: Option<String>,
    #[serde(default, rename = "budgetMin")]
    budget_min: Option<f64>,
    #[serde(default, rename = "budgetMax")]
    budget_max: Option<f64>,
}
