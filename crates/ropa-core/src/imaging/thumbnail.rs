//! Thumbnail generation with JPEG output.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use crate::error::TagError;

/// Shrinks images into a bounding box and encodes them as JPEG.
pub struct ThumbnailEncoder {
    size: u32,
    quality: u8,
}

impl ThumbnailEncoder {
    /// `size` is the bounding box edge; aspect ratio is preserved.
    pub fn new(size: u32, quality: u8) -> Self {
        Self { size, quality }
    }

    /// Encode a thumbnail and return the raw JPEG bytes.
    pub fn encode_bytes(&self, image: &DynamicImage) -> Result<Vec<u8>, TagError> {
        // Only shrink; thumbnail() would upscale anything smaller than the box
        let resized = if image.width() > self.size || image.height() > self.size {
            image.thumbnail(self.size, self.size)
        } else {
            image.clone()
        };

        // JPEG has no alpha channel
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(|e| TagError::Encode(e.to_string()))?;
        Ok(buffer)
    }

    /// Encode a thumbnail and return it base64-encoded.
    pub fn encode_base64(&self, image: &DynamicImage) -> Result<String, TagError> {
        Ok(BASE64.encode(self.encode_bytes(image)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn test_thumbnail_fits_bounding_box() {
        let encoder = ThumbnailEncoder::new(150, 75);
        let img = DynamicImage::new_rgb8(1000, 500);
        let bytes = encoder.encode_bytes(&img).unwrap();

        // JPEG SOI marker
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (150, 75));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let encoder = ThumbnailEncoder::new(150, 75);
        let img = DynamicImage::new_rgb8(40, 30);
        let bytes = encoder.encode_bytes(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (40, 30));
    }

    #[test]
    fn test_alpha_image_encodes() {
        let encoder = ThumbnailEncoder::new(64, 75);
        let img = DynamicImage::new_rgba8(200, 200);
        assert!(encoder.encode_base64(&img).is_ok());
    }
}
