//! Core types for decoded images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The image (or a requested resize target) has a zero dimension.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Memory layout of the pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// 3 bytes per pixel.
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }

    pub fn to_color_type(self) -> image::ExtendedColorType {
        match self {
            PixelLayout::Rgb8 => image::ExtendedColorType::Rgb8,
            PixelLayout::Rgba8 => image::ExtendedColorType::Rgba8,
        }
    }
}

/// How the source stored its pixels.
///
/// This drives output format selection: alpha and palette data lose
/// correctness under a lossy re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelMode {
    /// Opaque color or grayscale without an alpha channel.
    Opaque,
    /// Carries an alpha channel (RGBA, grayscale + alpha).
    Alpha,
    /// Indexed color (PNG palette, GIF).
    Palette,
}

impl PixelMode {
    /// Returns true if this mode must be kept in a lossless-capable format.
    #[inline]
    pub fn requires_lossless(self) -> bool {
        matches!(self, PixelMode::Alpha | PixelMode::Palette)
    }
}

/// A decoded image, immutable once handed to the encoder.
///
/// Resizing produces a new `DecodedImage`; nothing mutates the pixels in place.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Layout of `pixels`.
    pub layout: PixelLayout,
    /// Source pixel mode classification.
    pub mode: PixelMode,
    /// Interleaved pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        mode: PixelMode,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            mode,
            pixels,
        }
    }

    /// Create an opaque DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgb8,
            mode: PixelMode::Opaque,
            pixels: img.into_raw(),
        }
    }

    /// Create a DecodedImage from an image::RgbaImage with the given mode.
    pub fn from_rgba_image(img: image::RgbaImage, mode: PixelMode) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgba8,
            mode,
            pixels: img.into_raw(),
        }
    }

    /// Create a DecodedImage from any decoded image, keeping alpha if present.
    pub fn from_dynamic(img: image::DynamicImage, mode: PixelMode) -> Self {
        if img.color().has_alpha() {
            Self::from_rgba_image(img.into_rgba8(), mode)
        } else {
            let mut decoded = Self::from_rgb_image(img.into_rgb8());
            decoded.mode = mode;
            decoded
        }
    }

    /// Convert to an image::DynamicImage for resampling.
    pub fn to_dynamic_image(&self) -> Option<image::DynamicImage> {
        match self.layout {
            PixelLayout::Rgb8 => {
                image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(image::DynamicImage::ImageRgb8)
            }
            PixelLayout::Rgba8 => {
                image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                    .map(image::DynamicImage::ImageRgba8)
            }
        }
    }

    /// Drop the alpha channel (if any) without compositing.
    pub fn to_opaque(&self) -> DecodedImage {
        match self.layout {
            PixelLayout::Rgb8 => DecodedImage {
                mode: PixelMode::Opaque,
                ..self.clone()
            },
            PixelLayout::Rgba8 => {
                let pixels = self
                    .pixels
                    .chunks_exact(4)
                    .flat_map(|px| [px[0], px[1], px[2]])
                    .collect();
                DecodedImage::new(
                    self.width,
                    self.height,
                    PixelLayout::Rgb8,
                    PixelMode::Opaque,
                    pixels,
                )
            }
        }
    }

    /// Returns true if the pixel buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout == PixelLayout::Rgba8
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
