//! Free-form questions about the wardrobe, answered with the tag store as
//! context.

use super::provider::{ChatMessage, ChatRequest, LlmProvider};
use crate::error::LlmError;
use crate::store::TagStore;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "Sos un asistente argentino experto en moda.";

/// Answers wardrobe questions through a text-only chat call.
pub struct Advisor {
    provider: Arc<dyn LlmProvider>,
    temperature: f64,
}

impl Advisor {
    pub fn new(provider: Arc<dyn LlmProvider>, temperature: f64) -> Self {
        Self {
            provider,
            temperature,
        }
    }

    /// One stateless call: no earlier questions or answers are sent.
    pub async fn answer(&self, question: &str, wardrobe: &TagStore) -> Result<String, LlmError> {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(prompt(question, wardrobe)),
            ],
            temperature: self.temperature,
        };
        let response = self.provider.complete(&request).await?;
        tracing::debug!(
            model = %response.model,
            latency_ms = response.latency_ms,
            tokens = ?response.tokens_used,
            "Answer received"
        );
        Ok(response.text)
    }
}

fn prompt(question: &str, wardrobe: &TagStore) -> String {
    format!(
        "En base a esta información de mi ropa disponible:\n{}\n\
         Responde la siguiente pregunta usando español de Argentina: {question}",
        wardrobe.to_compact_json()
    )
}
