//! PNG encoding, the lossless-capable output.
//!
//! Uses the `image` crate's PNG encoder at its strongest compression with
//! adaptive filtering. There is no quality parameter: the only size levers
//! left for PNG are the pixel count and content.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::ImageEncoder;

use super::types::check_pixels;
use super::{EncodeError, OutputFormat};
use crate::decode::PixelLayout;

/// Encode RGB or RGBA pixel data to optimized PNG bytes.
///
/// # Arguments
///
/// * `pixels` - Interleaved pixel data in row-major order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - Whether `pixels` carries an alpha channel
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, EncodeError> {
    check_pixels(pixels, width, height, layout)?;

    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, PngFilter::Adaptive);

    encoder
        .write_image(pixels, width, height, layout.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer)
}
