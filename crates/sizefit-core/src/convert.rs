//! Fixed-quality WebP conversion for web display.
//!
//! Unlike target-size encoding there is no byte budget: the image is
//! shrunk to fit a display box, flattened to RGB and encoded once.

use serde::{Deserialize, Serialize};

use crate::decode::{resize_to_fit, DecodedImage, FilterType};
use crate::encode::{encode_webp, EncodeError, DEFAULT_WEBP_QUALITY};

/// Settings for [`convert_to_webp`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// WebP quality (0-100).
    pub quality: u8,
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// Maximum output height in pixels.
    pub max_height: u32,
    pub filter: FilterType,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_WEBP_QUALITY,
            max_width: 1920,
            max_height: 1080,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Output of [`convert_to_webp`].
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

/// Shrink `image` to fit the configured box (never upscaling), drop alpha,
/// and encode as WebP (lossy unless built without the `libwebp` feature).
pub fn convert_to_webp(
    image: &DecodedImage,
    config: &ConvertConfig,
) -> Result<ConvertedImage, EncodeError> {
    let fitted = resize_to_fit(image, config.max_width, config.max_height, config.filter)
        .map_err(|e| EncodeError::ResizeFailed(e.to_string()))?;
    let opaque = fitted.to_opaque();

    let bytes = encode_webp(
        &opaque.pixels,
        opaque.width,
        opaque.height,
        opaque.layout,
        config.quality,
    )?;

    log::debug!(
        "converted {}x{} to {}x{} WebP ({} bytes, quality {})",
        image.width,
        image.height,
        opaque.width,
        opaque.height,
        bytes.len(),
        config.quality
    );

    Ok(ConvertedImage {
        bytes,
        width: opaque.width,
        height: opaque.height,
        quality: config.quality,
    })
}
