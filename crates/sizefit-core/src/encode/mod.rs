//! Image encoding for sizefit.
//!
//! This module provides functionality for:
//! - Choosing the output format from the source pixel mode
//! - Encoding to optimized PNG (lossless-capable)
//! - Encoding to WebP, lossy with a quality knob when built with the
//!   `libwebp` feature (lossy-capable)
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::encode::{encode_image, select_format};
//!
//! let format = select_format(image.mode);
//! let bytes = encode_image(&image, format, Some(75)).unwrap();
//! println!("{} bytes as {}", bytes.len(), format);
//! ```

mod png;
mod types;
mod webp_lossy;

pub use png::encode_png;
pub use types::{EncodeError, OutputFormat};
pub use webp_lossy::{encode_webp, DEFAULT_WEBP_QUALITY, LOSSY_WEBP};

use crate::decode::{DecodedImage, PixelMode};

/// Choose the output format for a pixel mode.
///
/// Alpha and palette data would lose correctness under a lossy re-encode,
/// so they go to PNG; everything else goes to lossy WebP.
pub fn select_format(mode: PixelMode) -> OutputFormat {
    if mode.requires_lossless() {
        OutputFormat::Png
    } else {
        OutputFormat::WebP
    }
}

/// Encode a decoded image in the given format.
///
/// `quality` only applies to formats that support it; `None` uses the
/// format's default.
pub fn encode_image(
    image: &DecodedImage,
    format: OutputFormat,
    quality: Option<u8>,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height, image.layout),
        OutputFormat::WebP => encode_webp(
            &image.pixels,
            image.width,
            image.height,
            image.layout,
            quality.unwrap_or(DEFAULT_WEBP_QUALITY),
        ),
    }
}
