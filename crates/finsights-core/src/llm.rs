//! OpenAI-compatible LLM client
//!
//! Thin client for the `/v1/chat/completions` API used by the chat assistant
//! and the AI insight path. Every call is bounded by a request timeout so a
//! hung upstream cannot hold a request; callers treat any error as
//! recoverable and substitute the documented local fallback.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{SpendingData, SpendingInsight};

const DEFAULT_HOST: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;

/// One message in a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Debug, Clone)]
pub struct LlmClient {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create from environment variables.
    ///
    /// Required: `OPENAI_API_KEY`. Optional overrides: `FINSIGHTS_LLM_HOST`
    /// (default api.openai.com), `FINSIGHTS_LLM_MODEL` (default
    /// gpt-3.5-turbo). Returns None when no key is configured, in which case
    /// all AI features run on local fallbacks.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        let host =
            std::env::var("FINSIGHTS_LLM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model =
            std::env::var("FINSIGHTS_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(&host, &model, &api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    /// Make a chat completion request, returning the first choice's content
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "chat completions error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Upstream("no choices in chat completion response".into()))
    }

    /// Ask the model for spending insights as a JSON array.
    ///
    /// Callers fall back to the local insight engine on any error here.
    pub async fn generate_insights(&self, spending: &SpendingData) -> Result<Vec<SpendingInsight>> {
        let prompt = insight_prompt(spending);
        debug!(model = %self.model, "Requesting AI insights");

        let response = self
            .chat(vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }])
            .await?;

        parse_insights(&response)
    }
}

/// Render the insight-generation prompt from the spending summary
fn insight_prompt(spending: &SpendingData) -> String {
    let categories = spending
        .category_spending
        .iter()
        .map(|c| format!("- {}: ${:.2}", c.category, c.amount))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a financial advisor for college students. Given this month's spending, \
         respond with ONLY a JSON array of insight objects, each with string fields \
         \"title\", \"description\", \"category\", \"amount\", and \"tip\".\n\n\
         Total monthly spending: ${:.2}\n{}",
        spending.total_monthly_spend, categories
    )
}

/// Cap raw model output included in error messages. Truncation must land on
/// a char boundary; the response is arbitrary UTF-8.
fn truncate_raw(raw: &str) -> String {
    const MAX_RAW_LEN: usize = 200;
    if raw.len() <= MAX_RAW_LEN {
        return raw.to_string();
    }
    let mut end = MAX_RAW_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &raw[..end])
}

/// Extract the insight array from a model response, which often wraps the
/// JSON payload in extra prose or code fences.
fn parse_insights(response: &str) -> Result<Vec<SpendingInsight>> {
    let response = response.trim();
    let start = response.find('[');
    let end = response.rfind(']');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            let insights: Vec<SpendingInsight> = serde_json::from_str(json_str).map_err(|e| {
                Error::InvalidData(format!(
                    "Invalid JSON from AI: {} | Raw: {}",
                    e,
                    truncate_raw(json_str)
                ))
            })?;
            if insights.is_empty() {
                return Err(Error::InvalidData("AI returned no insights".into()));
            }
            Ok(insights)
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON array found in AI response | Raw: {}",
            truncate_raw(response)
        ))),
    }
}
