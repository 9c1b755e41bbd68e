//! Configuration management for Ropa.
//!
//! Configuration is loaded from the platform config directory (or an explicit
//! path) with sensible defaults. Secrets accept `${ENV_VAR}` references so the
//! password and API key never need to live in the file itself.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Ropa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Password gate settings
    pub access: AccessConfig,

    /// Hosted language model settings
    pub llm: LlmConfig,

    /// Image tagging settings
    pub tagging: TaggingConfig,

    /// Question answering settings
    pub qa: QaConfig,

    /// Upload limits and accepted formats
    pub upload: UploadConfig,

    /// Gallery layout settings
    pub gallery: GalleryConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.ropa.ropa/config.toml
    /// - Linux: ~/.config/ropa/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\ropa\config\config.toml
    ///
    /// Falls back to ~/.ropa/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ropa", "ropa")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".ropa").join("config.toml")
            })
    }

    /// Resolve the gate password, expanding `${ENV_VAR}` references.
    pub fn password(&self) -> Result<String, ConfigError> {
        resolve_env_var(&self.access.password).ok_or_else(|| ConfigError::MissingSecret {
            name: "Password",
            hint: env_hint(&self.access.password, "ROPA_PASSWORD"),
        })
    }

    /// Resolve the model API key, expanding `${ENV_VAR}` references.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_env_var(&self.llm.api_key).ok_or_else(|| ConfigError::MissingSecret {
            name: "OpenAI API key",
            hint: env_hint(&self.llm.api_key, "OPENAI_API_KEY"),
        })
    }

    /// Default export path (with ~ expansion).
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.gallery.export_file).into_owned())
    }

    /// Default HTML gallery path (with ~ expansion).
    pub fn gallery_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.gallery.html_file).into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Name the env var a `${VAR}` reference points at, for error messages.
fn env_hint(value: &str, fallback: &str) -> String {
    if value.starts_with("${") && value.ends_with('}') {
        value[2..value.len() - 1].to_string()
    } else {
        fallback.to_string()
    }
}
