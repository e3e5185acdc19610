//! OpenAI-compatible chat-completion client.
//!
//! Non-streaming `POST {base_url}/chat/completions` with Bearer auth. Works
//! against any endpoint that speaks the same wire format by overriding
//! `base_url` in [`OpenAiConfig`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::provider::{ChatMessage, ChatProvider, LlmError, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for [`OpenAiProvider`].
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Bearer token.
    pub api_key: String,
    /// Model identifier, e.g. `gpt-4-turbo`.
    pub model: String,
    /// Override for the API base URL. `None` uses [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

/// OpenAI-compatible LLM provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create a new provider with its own HTTP client.
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: OpenAiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        let base_url = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{base_url}/chat/completions")
    }
}

/// Pull a human-readable message out of an API error body.
fn parse_api_error(body: &str, status: u16) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json["error"]["message"].as_str() {
            return message.to_string();
        }
    }
    format!("HTTP {status}: {body}")
}

/// Extract `choices[0].message.content` from a 2xx response body.
fn extract_content(body: &Value) -> Result<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .ok_or_else(|| {
            LlmError::MalformedResponse("response missing choices[0].message.content".into())
        })
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
        };

        debug!(message_count = messages.len(), "sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let message = parse_api_error(&body_text, status.as_u16());
            error!(status = status.as_u16(), "chat completion API error");
            if status.as_u16() == 429 {
                return Err(LlmError::RateLimited { message });
            }
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        extract_content(&body)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
