//! Error types for Ropa.
//!
//! Errors are organized by the user action that raises them, so the
//! interactive session can tell a recoverable inline error (bad password,
//! malformed import) from a failed interaction (model call, tagging).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Ropa operations.
#[derive(Error, Debug)]
pub enum RopaError {
    /// A session handler was called before the password was accepted
    #[error("Session is locked: enter the password first")]
    Locked,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Upload / tagging errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// Wardrobe import errors
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Language model call errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A required secret is not configured
    #[error("{name} not set. Set {hint} or add it to the config file.")]
    MissingSecret { name: &'static str, hint: String },
}

/// Errors from the hosted language model.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-2xx HTTP response
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The response carried no completion text
    #[error("Model returned no content")]
    EmptyReply,
}

/// Errors from tagging a single image.
#[derive(Error, Debug)]
pub enum TagError {
    /// The image bytes could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Decoding took longer than the configured limit
    #[error("Decode timed out after {timeout_ms}ms")]
    DecodeTimeout { timeout_ms: u64 },

    /// The thumbnail could not be encoded
    #[error("Thumbnail encode failed: {0}")]
    Encode(String),

    /// The model call itself failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The model reply was not a valid five-field tag record
    #[error("Model reply is not a valid tag record ({reason}): {reply}")]
    InvalidReply { reason: String, reply: String },
}

/// Errors from an upload batch.
#[derive(Error, Debug)]
pub enum UploadError {
    /// File not found or unreadable
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// File name yields no usable item identifier
    #[error("Cannot derive an item name from {0}")]
    InvalidName(String),

    /// Tagging the named item failed
    #[error("Tagging failed for {item}: {source}")]
    Tagging {
        item: String,
        #[source]
        source: TagError,
    },
}

/// Errors from importing a wardrobe file. The store is never modified when
/// one of these is returned.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The file is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The file is not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object
    #[error("Expected a JSON object of items, found {0}")]
    NotAnObject(&'static str),

    /// An entry is not a valid tag record
    #[error("Entry '{item}' is not a valid tag record: {message}")]
    InvalidEntry { item: String, message: String },
}

/// Convenience type alias for Ropa results.
pub type Result<T> = std::result::Result<T, RopaError>;
