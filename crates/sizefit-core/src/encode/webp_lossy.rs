//! WebP encoding.
//!
//! The `image` crate only writes lossless WebP, so the lossy path goes through
//! libwebp via the `webp` crate (the `libwebp` feature, on by default).
//! libwebp is C and does not build for `wasm32-unknown-unknown`; without the
//! feature, WebP is written lossless by `image` and has no quality knob.

use super::types::check_pixels;
use super::EncodeError;
use crate::decode::PixelLayout;

/// Default lossy quality, matching libwebp's `cwebp` default.
pub const DEFAULT_WEBP_QUALITY: u8 = 80;

/// Whether WebP output is lossy and honors a quality setting.
pub const LOSSY_WEBP: bool = cfg!(feature = "libwebp");

/// Encode RGB or RGBA pixel data to WebP bytes.
///
/// # Arguments
///
/// * `pixels` - Interleaved pixel data in row-major order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - Whether `pixels` carries an alpha channel
/// * `quality` - 0-100, clamped; higher is larger and more faithful.
///   Ignored when [`LOSSY_WEBP`] is false.
///
/// # Quality Guidelines
///
/// * 80-90: Good quality, hard to tell from the source on photos
/// * 50-80: Typical web range
/// * Below 30: Visible blocking and smearing
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_pixels(pixels, width, height, layout)?;
    write_webp(pixels, width, height, layout, quality.min(100))
}

#[cfg(feature = "libwebp")]
fn write_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let encoder = match layout {
        PixelLayout::Rgb8 => webp::Encoder::from_rgb(pixels, width, height),
        PixelLayout::Rgba8 => webp::Encoder::from_rgba(pixels, width, height),
    };

    let encoded = encoder
        .encode_simple(false, quality as f32)
        .map_err(|e| EncodeError::EncodingFailed {
            format: super::OutputFormat::WebP,
            message: format!("{e:?}"),
        })?;

    Ok(encoded.to_vec())
}

#[cfg(not(feature = "libwebp"))]
fn write_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    _quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    use image::codecs::webp::WebPEncoder;
    use image::ImageEncoder;

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, layout.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            format: super::OutputFormat::WebP,
            message: e.to_string(),
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_webp(bytes: &[u8]) -> bool {
        bytes.len() > 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
    }

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width) as u8);
                pixels.push(((y * 255) / height) as u8);
                pixels.push((((x ^ y) * 7) % 256) as u8);
            }
        }
        pixels
    }

    #[test]
    fn test_encode_webp_basic() {
        let pixels = vec![128u8; 64 * 64 * 3];
        let bytes = encode_webp(&pixels, 64, 64, PixelLayout::Rgb8, 80).unwrap();
        assert!(is_webp(&bytes));
    }

    #[test]
    fn test_encode_webp_rgba() {
        let pixels = vec![200u8; 16 * 16 * 4];
        let bytes = encode_webp(&pixels, 16, 16, PixelLayout::Rgba8, 50).unwrap();
        assert!(is_webp(&bytes));
    }

    #[cfg(feature = "libwebp")]
    #[test]
    fn test_encode_webp_quality_affects_size() {
        let pixels = gradient(128, 128);
        let low = encode_webp(&pixels, 128, 128, PixelLayout::Rgb8, 10).unwrap();
        let high = encode_webp(&pixels, 128, 128, PixelLayout::Rgb8, 95).unwrap();

        assert!(high.len() > low.len());
    }

    #[test]
    fn test_encode_webp_quality_clamped() {
        let pixels = vec![128u8; 8 * 8 * 3];
        assert!(encode_webp(&pixels, 8, 8, PixelLayout::Rgb8, 255).is_ok());
    }

    #[test]
    fn test_encode_webp_single_pixel() {
        let bytes = encode_webp(&[0, 255, 0], 1, 1, PixelLayout::Rgb8, 80).unwrap();
        assert!(is_webp(&bytes));
    }

    #[test]
    fn test_encode_webp_invalid_pixel_data() {
        let result = encode_webp(&[0u8; 5], 2, 2, PixelLayout::Rgb8, 80);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_webp_zero_height() {
        let result = encode_webp(&[], 4, 0, PixelLayout::Rgb8, 80);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[cfg(not(feature = "libwebp"))]
    #[test]
    fn test_encode_webp_lossless_ignores_quality() {
        let pixels = gradient(32, 32);
        let low = encode_webp(&pixels, 32, 32, PixelLayout::Rgb8, 10).unwrap();
        let high = encode_webp(&pixels, 32, 32, PixelLayout::Rgb8, 95).unwrap();

        assert!(is_webp(&low));
        assert_eq!(low, high);
        assert!(!LOSSY_WEBP);
    }
}
