//! Image handling for the tagging call: decode uploaded bytes and shrink
//! them into the small JPEG the model receives.

pub mod decode;
pub mod thumbnail;

pub use decode::{DecodedImage, ImageDecoder};
pub use thumbnail::ThumbnailEncoder;
