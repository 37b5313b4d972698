//! Target-size encoding bindings.
//!
//! # Example
//!
//! ```typescript
//! import { fit_bytes } from '@sizefit/wasm';
//!
//! const result = fit_bytes(bytes, 20 * 1024);
//! if (!result.met_budget) {
//!   console.warn(`Best effort: ${result.size_bytes} bytes`);
//! }
//! const blob = new Blob([result.bytes()], { type: result.mime_type });
//! ```

use crate::types::{JsDecodedImage, JsFitResult};
use sizefit_core::fit::{SearchConfig, TargetSizeEncoder};
use wasm_bindgen::prelude::*;

/// Encode an already decoded image within `target_bytes`, using the
/// default search bounds.
#[wasm_bindgen]
pub fn fit_image(image: &JsDecodedImage, target_bytes: usize) -> Result<JsFitResult, JsValue> {
    TargetSizeEncoder::default()
        .encode(image.as_decoded(), target_bytes)
        .map(JsFitResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Like [`fit_image`], with search bounds from a plain JS object.
///
/// Missing fields take their defaults, e.g. `{ min_quality: 30 }`.
#[wasm_bindgen]
pub fn fit_image_with_config(
    image: &JsDecodedImage,
    target_bytes: usize,
    config: JsValue,
) -> Result<JsFitResult, JsValue> {
    let config: SearchConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid search config: {}", e)))?;
    let encoder = TargetSizeEncoder::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    encoder
        .encode(image.as_decoded(), target_bytes)
        .map(JsFitResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode `bytes` and encode the image within `target_bytes`.
#[wasm_bindgen]
pub fn fit_bytes(bytes: &[u8], target_bytes: usize) -> Result<JsFitResult, JsValue> {
    sizefit_core::fit_bytes(bytes, target_bytes, &SearchConfig::default())
        .map(JsFitResult::from_result)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
