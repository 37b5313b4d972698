//! Sizefit WASM - WebAssembly bindings for Sizefit
//!
//! This crate provides WASM bindings to expose the sizefit-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and fit results
//! - `decode` - Image decoding and resize bindings
//! - `fit` - Target-size encoding bindings
//! - `convert` - Fixed-quality WebP conversion
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, fit_image } from '@sizefit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const result = fit_image(image, 20 * 1024);
//! console.log(`${result.extension}: ${result.size_bytes} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod convert;
mod decode;
mod fit;
mod types;

// Re-export public types
pub use convert::convert_to_webp;
pub use decode::{decode_image, resize, resize_to_fit};
pub use fit::{fit_bytes, fit_image, fit_image_with_config};
pub use types::{JsDecodedImage, JsFitResult};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Whether WebP output is lossy.
///
/// False in wasm32 builds, which leave out libwebp: WebP is then lossless,
/// the quality search is skipped and size is reached by resizing alone.
#[wasm_bindgen]
pub fn lossy_webp() -> bool {
    sizefit_core::encode::LOSSY_WEBP
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
