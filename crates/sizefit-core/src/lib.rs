//! Sizefit Core - encode images under a byte budget
//!
//! This crate decodes an image, picks an output format from its pixel mode,
//! and searches encoder quality and spatial scale until the encoding fits a
//! size ceiling. It also provides the fixed-quality WebP conversion used for
//! photos that have no size ceiling.

pub mod convert;
pub mod decode;
pub mod encode;
pub mod fit;

pub use convert::{convert_to_webp, ConvertConfig, ConvertedImage};
pub use decode::{decode_image, DecodeError, DecodedImage, PixelMode};
pub use encode::{select_format, EncodeError, OutputFormat};
pub use fit::{FitError, FitReport, FitResult, SearchConfig, Strategy, TargetSizeEncoder};

/// Decode `bytes` and encode the image within `target_bytes`.
///
/// Decode failures are returned as errors; missing the budget is reported
/// through `FitReport::met_budget`.
pub fn fit_bytes(
    bytes: &[u8],
    target_bytes: usize,
    config: &SearchConfig,
) -> Result<FitResult, FitError> {
    let encoder = TargetSizeEncoder::new(config.clone())?;
    let image = decode_image(bytes)?;
    encoder.encode(&image, target_bytes)
}
