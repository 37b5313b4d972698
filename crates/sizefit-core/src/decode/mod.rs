//! Image decoding and resampling for sizefit.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG, GIF and WebP containers into an in-memory image
//! - Classifying the source pixel mode (opaque, alpha, palette)
//! - Resizing to exact dimensions or to fit a bounding box
//!
//! All operations are synchronous and never mutate their input.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::decode::{decode_image, resize, scaled_dimensions, FilterType};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let (w, h) = scaled_dimensions(image.width, image.height, 0.5);
//! let half = resize(&image, w, h, FilterType::Lanczos3).unwrap();
//! println!("{:?}: {}x{}", image.mode, half.width, half.height);
//! ```

mod container;
mod resize;
mod types;

pub use container::{classify_pixel_mode, decode_image};
pub use resize::{resize, resize_to_fit, scaled_dimensions};
pub use types::{DecodeError, DecodedImage, FilterType, PixelLayout, PixelMode};
