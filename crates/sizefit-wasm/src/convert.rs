//! Fixed-quality WebP conversion bindings.

use crate::types::{filter_from_u8, JsDecodedImage};
use sizefit_core::convert::{self, ConvertConfig};
use wasm_bindgen::prelude::*;

/// Shrink `image` into `max_width` x `max_height`, drop alpha and encode
/// it as lossy WebP at `quality` (0-100).
///
/// # Example
///
/// ```typescript
/// const webp = convert_to_webp(image, 80, 1920, 1080, 2);
/// const blob = new Blob([webp], { type: 'image/webp' });
/// ```
#[wasm_bindgen]
pub fn convert_to_webp(
    image: &JsDecodedImage,
    quality: u8,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<Vec<u8>, JsValue> {
    let config = ConvertConfig {
        quality,
        max_width,
        max_height,
        filter: filter_from_u8(filter),
    };
    convert::convert_to_webp(image.as_decoded(), &config)
        .map(|converted| converted.bytes)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
