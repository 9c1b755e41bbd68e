//! Vision tagging: one photo in, one validated [`TagRecord`] out.

use super::provider::{ChatMessage, ChatRequest, ImageInput, LlmProvider};
use crate::config::TaggingConfig;
use crate::error::TagError;
use crate::imaging::{ImageDecoder, ThumbnailEncoder};
use crate::types::{TagRecord, UploadedImage};
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "Sos un asistente experto en moda que habla español de Argentina.";

const TAG_PROMPT: &str = "Analiza esta imagen y proporciona las siguientes etiquetas \
(usa términos en español de Argentina): \
- Categoria (Ejemplo: Deportiva, Casual, Formal, etc.)\n\
- Tipo (Ejemplo: Camiseta, Pantalón, Zapatillas, etc.)\n\
- Color predominante\n\
- Rango de temperatura óptimo (ej. \"-5°C a 5°C\" ; \"10°C a 20°C\"; etc. )\n\
- Clima recomendado (lluvioso, soleado, etc.)\n\n\
Responde UNICAMENTE con una string json válida que tenga el siguiente formato:\n\
{\"categoria\": \"...\", \"tipo\": \"...\", \"color\": \"...\", \"temperatura\": \"...\", \"clima\": \"...\"}";

/// Tags clothing photos through a vision-capable model.
pub struct Tagger {
    provider: Arc<dyn LlmProvider>,
    decoder: ImageDecoder,
    thumbnails: ThumbnailEncoder,
}

impl Tagger {
    /// Tagging is deterministic: the same photo should get the same tags.
    pub const TEMPERATURE: f64 = 0.0;

    pub fn new(provider: Arc<dyn LlmProvider>, config: &TaggingConfig) -> Self {
        Self {
            provider,
            decoder: ImageDecoder::new(config.decode_timeout_ms),
            thumbnails: ThumbnailEncoder::new(config.thumbnail_size, config.jpeg_quality),
        }
    }

    /// Decode, shrink and send the photo; parse the reply as a tag record.
    ///
    /// One model call per invocation. No retry.
    pub async fn tag(&self, image: &UploadedImage) -> Result<TagRecord, TagError> {
        let decoded = self
            .decoder
            .decode(image.bytes.clone(), &image.file_name)
            .await?;
        let encoded = self.thumbnails.encode_base64(&decoded.image)?;

        tracing::debug!(
            file = %image.file_name,
            format = ?decoded.format,
            width = decoded.width,
            height = decoded.height,
            "Requesting tags"
        );

        let request = Self::request(ImageInput::jpeg_base64(encoded));
        let response = self.provider.complete(&request).await?;

        tracing::debug!(
            file = %image.file_name,
            model = %response.model,
            latency_ms = response.latency_ms,
            tokens = ?response.tokens_used,
            "Tags received"
        );

        parse_reply(&response.text)
    }

    fn request(image: ImageInput) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(TAG_PROMPT),
                ChatMessage::user_image(image),
            ],
            temperature: Self::TEMPERATURE,
        }
    }
}

/// Validate a model reply against the five-field tag schema.
///
/// A reply wrapped in a Markdown code fence is unwrapped first.
pub fn parse_reply(reply: &str) -> Result<TagRecord, TagError> {
    let invalid = |reason: String| TagError::InvalidReply {
        reason,
        reply: reply.to_string(),
    };

    let value: serde_json::Value =
        serde_json::from_str(strip_code_fence(reply)).map_err(|e| invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid("expected a JSON object".to_string()));
    }
    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
