//! OpenAI provider using the Chat Completions API.
//!
//! Images travel as data URLs inside the user message content array.

use super::provider::{ChatRequest, LlmProvider, LlmResponse, MessagePart};
use crate::config::LlmConfig;
use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// OpenAI (or compatible) provider using the Chat Completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Create a provider against `{base_url}/chat/completions`.
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
        }
    }

    /// Create from the `[llm]` config section and a resolved API key.
    pub fn from_config(config: &LlmConfig, api_key: &str) -> Self {
        Self::new(
            &config.endpoint,
            api_key,
            &config.model,
            Duration::from_millis(config.timeout_ms),
        )
    }

    fn body(&self, request: &ChatRequest) -> ChatBody {
        ChatBody {
            model: self.model.clone(),
            temperature: request.temperature,
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: m
                        .parts
                        .iter()
                        .map(|p| match p {
                            MessagePart::Text(text) => WireContent::Text { text: text.clone() },
                            MessagePart::Image(image) => WireContent::ImageUrl {
                                image_url: ImageUrl {
                                    url: image.data_url(),
                                },
                            },
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatBody {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: Vec<WireContent>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum WireContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, LlmError> {
        let start = Instant::now();
        let body = self.body(request);

        tracing::debug!(
            model = %self.model,
            temperature = request.temperature,
            image = request.has_image(),
            "Sending chat completion"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout())
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyReply)?;

        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(latency_ms, model = %chat_resp.model, "Chat completion finished");

        Ok(LlmResponse {
            text: text.trim().to_string(),
            model: chat_resp.model,
            tokens_used: chat_resp.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
