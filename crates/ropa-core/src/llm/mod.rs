//! Language model integration.
//!
//! A single provider abstraction over an OpenAI-compatible chat endpoint,
//! used by two callers: the [`Tagger`] (vision call, JSON reply) and the
//! [`Advisor`] (text-only wardrobe questions).

pub(crate) mod advisor;
pub(crate) mod openai;
pub(crate) mod provider;
pub(crate) mod tagger;

pub use advisor::Advisor;
pub use openai::OpenAiProvider;
pub use provider::{ChatMessage, ChatRequest, ImageInput, LlmProvider, LlmResponse, MessagePart, Role};
pub use tagger::Tagger;
