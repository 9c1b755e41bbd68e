//! Ropa Core - wardrobe session library.
//!
//! Upload photos of clothing, tag each one with five fashion attributes via
//! a vision-capable language model, browse the tagged wardrobe as a gallery,
//! export/import the tags as JSON, and ask the model questions about it.
//!
//! # Flow
//!
//! ```text
//! password → Session → upload (decode → thumbnail → tag) → TagStore ⇄ JSON file
//!                                                          ↓
//!                                              Gallery / Advisor (Q&A)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ropa_core::{AccessGate, Config, OpenAiProvider, Session, Tagger};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> ropa_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = Arc::new(OpenAiProvider::from_config(&config.llm, &config.api_key()?));
//!     let tagger = Tagger::new(provider, &config.tagging);
//!
//!     let mut session = Session::new(AccessGate::new(config.password()?));
//!     session.authenticate("secret");
//!     let photos = vec![ropa_core::UploadedImage::new("red_jacket.jpg", std::fs::read("red_jacket.jpg")?)];
//!     session.upload(photos, &tagger, |_| {}).await?;
//!     println!("{}", session.export_wardrobe()?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod gate;
pub mod imaging;
pub mod llm;
pub mod session;
pub mod store;
pub mod types;
pub mod upload;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, ImportError, LlmError, Result, RopaError, TagError, UploadError};
pub use gallery::{Gallery, GalleryCell, ImageSource};
pub use gate::{AccessGate, GateOutcome};
pub use llm::{Advisor, LlmProvider, OpenAiProvider, Tagger};
pub use session::{Session, UploadProgress, UploadSummary};
pub use store::{ImageStore, TagStore};
pub use types::{ItemId, TagRecord, UploadedImage};
pub use upload::{DiscoveredFile, FileDiscovery};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
