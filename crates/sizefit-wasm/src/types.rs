//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core sizefit types,
//! handling the conversion between Rust and JavaScript data representations.

use sizefit_core::decode::{DecodedImage, FilterType, PixelLayout, PixelMode};
use sizefit_core::fit::{FitReport, FitResult};
use wasm_bindgen::prelude::*;

/// Convert a filter code from JavaScript to a [`FilterType`].
///
/// 0 = Nearest, 2 = Lanczos3, anything else = Bilinear.
pub fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// A decoded image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    inner: DecodedImage,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and RGB or RGBA pixel data.
    ///
    /// The layout is inferred from the buffer length. RGBA input is treated
    /// as having alpha, so it will be kept lossless.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        if width == 0 || height == 0 {
            return Err(JsValue::from_str(&format!(
                "Invalid dimensions: {}x{} has no pixels",
                width, height
            )));
        }

        let count = width as usize * height as usize;
        let (layout, mode) = if pixels.len() == count * 4 {
            (PixelLayout::Rgba8, PixelMode::Alpha)
        } else if pixels.len() == count * 3 {
            (PixelLayout::Rgb8, PixelMode::Opaque)
        } else {
            return Err(JsValue::from_str(&format!(
                "Pixel buffer of {} bytes does not match {}x{} RGB or RGBA",
                pixels.len(),
                width,
                height
            )));
        };
        Ok(JsDecodedImage {
            inner: DecodedImage::new(width, height, layout, mode, pixels),
        })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Whether the pixel buffer is RGBA
    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha()
    }

    /// Source pixel mode: "opaque", "alpha" or "palette"
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        match self.inner.mode {
            PixelMode::Opaque => "opaque",
            PixelMode::Alpha => "alpha",
            PixelMode::Palette => "palette",
        }
        .to_string()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsDecodedImage {
    /// Wrap a core DecodedImage.
    pub fn from_decoded(img: DecodedImage) -> Self {
        JsDecodedImage { inner: img }
    }

    /// Borrow the core DecodedImage.
    pub fn as_decoded(&self) -> &DecodedImage {
        &self.inner
    }
}

/// Encoded output of a target-size request.
#[wasm_bindgen]
pub struct JsFitResult {
    bytes: Vec<u8>,
    report: FitReport,
}

#[wasm_bindgen]
impl JsFitResult {
    /// Encoded bytes (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// "png" or "webp"
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.report.format.extension().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.report.format.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn met_budget(&self) -> bool {
        self.report.met_budget
    }

    #[wasm_bindgen(getter)]
    pub fn size_bytes(&self) -> usize {
        self.report.size_bytes
    }

    /// Full report as a plain JS object.
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsFitResult {
    pub fn from_result(result: FitResult) -> Self {
        JsFitResult {
            bytes: result.bytes,
            report: result.report,
        }
    }

    pub fn report_ref(&self) -> &FitReport {
        &self.report
    }
}
