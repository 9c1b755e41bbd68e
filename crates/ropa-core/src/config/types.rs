//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};

/// Password gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Gate password (supports ${ENV_VAR} syntax)
    pub password: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            password: "${ROPA_PASSWORD}".to_string(),
        }
    }
}

/// Hosted language model settings, shared by tagging and Q&A.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model identifier used for both call shapes
    pub model: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_ms: 60_000,
        }
    }
}

/// Image tagging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// Bounding box (longest edge) the photo is shrunk to before sending
    pub thumbnail_size: u32,

    /// JPEG quality of the thumbnail sent to the model
    pub jpeg_quality: u8,

    /// Decode timeout in milliseconds
    pub decode_timeout_ms: u64,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: 150,
            jpeg_quality: 75,
            decode_timeout_ms: 5000,
        }
    }
}

/// Question answering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Sampling temperature for the Q&A call
    pub temperature: f64,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { temperature: 0.3 }
    }
}

/// Upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Accepted file extensions
    pub supported_formats: Vec<String>,

    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            supported_formats: vec!["jpg".to_string(), "jpeg".to_string()],
            max_file_size_mb: 20,
        }
    }
}

/// Gallery layout and file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Items per row
    pub columns: usize,

    /// Rows shown per terminal page
    pub rows_per_page: usize,

    /// Default wardrobe export file
    pub export_file: String,

    /// Default HTML gallery file
    pub html_file: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            rows_per_page: 4,
            export_file: "./armario.json".to_string(),
            html_file: "./galeria.html".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}
