//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "llm.model must not be empty".into(),
            ));
        }
        if self.llm.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_ms must be > 0".into(),
            ));
        }
        if self.tagging.thumbnail_size == 0 {
            return Err(ConfigError::ValidationError(
                "tagging.thumbnail_size must be > 0".into(),
            ));
        }
        if !(1..=100).contains(&self.tagging.jpeg_quality) {
            return Err(ConfigError::ValidationError(
                "tagging.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        if self.tagging.decode_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tagging.decode_timeout_ms must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.qa.temperature) {
            return Err(ConfigError::ValidationError(
                "qa.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.upload.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "upload.supported_formats must not be empty".into(),
            ));
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "upload.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.gallery.columns == 0 {
            return Err(ConfigError::ValidationError(
                "gallery.columns must be > 0".into(),
            ));
        }
        if self.gallery.rows_per_page == 0 {
            return Err(ConfigError::ValidationError(
                "gallery.rows_per_page must be > 0".into(),
            ));
        }
        Ok(())
    }
}
