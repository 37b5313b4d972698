//! Image resizing for scale trials and web conversion.
//!
//! Provides various resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType, PixelLayout};

/// Resize an image to exact dimensions.
///
/// The pixel layout and mode of the source are preserved.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero.
/// Returns `DecodeError::CorruptedFile` if the pixel buffer doesn't match the
/// source dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let filter = filter.to_image_filter();
    let mismatch = || DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string());

    let resized = match image.layout {
        PixelLayout::Rgb8 => {
            let src = image::RgbImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            image::imageops::resize(&src, width, height, filter).into_raw()
        }
        PixelLayout::Rgba8 => {
            let src = image::RgbaImage::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(mismatch)?;
            image::imageops::resize(&src, width, height, filter).into_raw()
        }
    };

    Ok(DecodedImage::new(width, height, image.layout, image.mode, resized))
}

/// Resize an image to fit within a bounding box while preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if the bounding box has a zero side.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }

    let (src_width, src_height) = (image.width, image.height);

    // If already fits, just clone
    if src_width <= max_width && src_height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(src_width, src_height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Dimensions of `width x height` scaled by `scale`.
///
/// Rounds to the nearest pixel and never returns a zero dimension.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let scale_one = |len: u32| ((len as f64 * scale).round() as u32).max(1);
    (scale_one(width), scale_one(height))
}

/// Calculate dimensions to fit within a box while preserving aspect ratio.
fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * ratio).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * ratio).round() as u32).clamp(1, max_height);
    (new_width, new_height)
}
