//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG, JPEG, GIF or WebP bytes
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Shrink an image into a bounding box, preserving aspect ratio
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, resize_to_fit } from '@sizefit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`${image.width}x${image.height} (${image.mode})`);
//! const preview = resize_to_fit(image, 1920, 1080, 2); // Lanczos3
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use sizefit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from bytes, sniffing the container from its magic bytes.
///
/// The returned image records whether the source had alpha or a palette,
/// which decides the output format used by `fit_image`.
///
/// # Errors
///
/// Returns an error if the format is unsupported, the data is corrupted,
/// or the image has zero dimensions.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Resize algorithm: 0=Nearest (fastest), 1=Bilinear (default), 2=Lanczos3 (best quality)
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(image.as_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Shrink an image to fit within `max_width` x `max_height`.
///
/// Images already inside the box are returned at their original size.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize_to_fit(
        image.as_decoded(),
        max_width,
        max_height,
        filter_from_u8(filter),
    )
    .map(JsDecodedImage::from_decoded)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}
