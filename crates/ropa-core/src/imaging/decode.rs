//! Image decoding with format detection and timeout support.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;

use crate::error::TagError;

/// Decodes uploaded image bytes off the async runtime.
pub struct ImageDecoder {
    timeout_ms: u64,
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    pub fn new(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// Decode an in-memory upload on a blocking worker, bounded by the timeout.
    ///
    /// `file_name` is only used as a format hint when the content cannot be
    /// sniffed.
    pub async fn decode(&self, bytes: Vec<u8>, file_name: &str) -> Result<DecodedImage, TagError> {
        let name = file_name.to_string();
        let decode_result = timeout(
            Duration::from_millis(self.timeout_ms),
            tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, &name)),
        )
        .await;

        match decode_result {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(TagError::Decode(format!("Task join error: {e}"))),
            Err(_) => Err(TagError::DecodeTimeout {
                timeout_ms: self.timeout_ms,
            }),
        }
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    pub(crate) fn decode_bytes_sync(
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<DecodedImage, TagError> {
        use std::io::Cursor;

        let mut reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| TagError::Decode(format!("Cannot detect image format: {e}")))?;
        let format = match reader.format() {
            Some(f) => f,
            None => {
                let f = ImageFormat::from_path(Path::new(file_name))
                    .map_err(|_| TagError::Decode(format!("Unsupported format: {file_name}")))?;
                reader.set_format(f);
                f
            }
        };
        let image = reader
            .decode()
            .map_err(|e| TagError::Decode(e.to_string()))?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }
}
