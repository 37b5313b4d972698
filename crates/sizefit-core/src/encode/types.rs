//! Shared encoding types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelLayout;

/// Errors that can occur while encoding a pixel buffer.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Resampling before the encode failed
    #[error("Resize failed: {0}")]
    ResizeFailed(String),

    /// The codec rejected the input or parameters
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Output container chosen for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless-capable: keeps alpha and palette data intact.
    Png,
    /// Lossy-capable: exposes a quality knob when built with libwebp.
    WebP,
}

impl OutputFormat {
    /// Returns true if the encoder exposes a quality parameter.
    #[inline]
    pub fn supports_quality(self) -> bool {
        match self {
            OutputFormat::Png => false,
            OutputFormat::WebP => super::LOSSY_WEBP,
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => f.write_str("PNG"),
            OutputFormat::WebP => f.write_str("WebP"),
        }
    }
}

/// Validate dimensions and buffer length before handing pixels to a codec.
pub(crate) fn check_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * layout.channels();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
