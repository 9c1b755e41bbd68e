//! LLM provider trait and request/response types.

use crate::error::LlmError;
use async_trait::async_trait;
use std::time::Duration;

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg")
    pub media_type: String,
}

impl ImageInput {
    /// Wrap an already base64-encoded JPEG.
    pub fn jpeg_base64(data: String) -> Self {
        Self {
            data,
            media_type: "image/jpeg".to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One piece of message content.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    Text(String),
    Image(ImageInput),
}

/// A chat message made of text and/or image parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    pub fn user_image(image: ImageInput) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart::Image(image)],
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
}

impl ChatRequest {
    /// Whether any message carries an image.
    pub fn has_image(&self) -> bool {
        self.messages
            .iter()
            .flat_map(|m| &m.parts)
            .any(|p| matches!(p, MessagePart::Image(_)))
    }
}

/// The response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Run one chat completion.
    async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, LlmError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted provider shared by the tagger, advisor and session tests.

    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    pub struct MockProvider {
        replies: Mutex<Vec<Result<String, u16>>>,
        pub calls: Arc<AtomicU32>,
        pub requests: Arc<Mutex<Vec<ChatRequest>>>,
    }

    impl MockProvider {
        /// Replies are handed out in order; the last one repeats.
        /// `Err(status)` answers with an HTTP error of that status.
        pub fn replying(replies: Vec<Result<String, u16>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                calls: Arc::new(AtomicU32::new(0)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn text(reply: &str) -> Self {
            Self::replying(vec![Ok(reply.to_string())])
        }

        pub fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_request(&self) -> Option<ChatRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(&self, request: &ChatRequest) -> Result<LlmResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.remove(0)
            } else {
                replies.first().cloned().unwrap_or(Err(500))
            };
            let reply = reply.map_err(|status| LlmError::Http {
                status,
                body: "mock failure".to_string(),
            });
            reply.map(|text| LlmResponse {
                text,
                model: "mock-v1".to_string(),
                tokens_used: Some(42),
                latency_ms: 1,
            })
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::jpeg_base64("/9j/".to_string());
        assert_eq!(input.media_type, "image/jpeg");
        assert_eq!(input.data_url(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_request_has_image() {
        let text_only = ChatRequest {
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.3,
        };
        assert!(!text_only.has_image());

        let with_image = ChatRequest {
            messages: vec![ChatMessage::user_image(ImageInput::jpeg_base64("AQ==".to_string()))],
            temperature: 0.0,
        };
        assert!(with_image.has_image());
    }

    #[test]
    fn test_role_names() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
    }
}
