//! Search bounds for target-size encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::encode::DEFAULT_WEBP_QUALITY;

/// Lowest quality the quality search will probe.
pub const MIN_QUALITY: u8 = 10;
/// Highest quality the quality search will probe.
pub const MAX_QUALITY: u8 = 90;
/// Smallest scale factor the resize search will probe.
pub const MIN_SCALE: f64 = 0.1;
/// Largest scale factor (full resolution).
pub const MAX_SCALE: f64 = 1.0;
/// The resize search stops once the scale bounds are this close.
pub const SCALE_TOLERANCE: f64 = 0.01;

/// Invalid search configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Quality bounds must satisfy 0 <= min <= max <= 100, got [{min}, {max}]")]
    InvalidQualityBounds { min: u8, max: u8 },

    #[error("Default quality must be at most 100, got {0}")]
    InvalidDefaultQuality(u8),

    #[error("Scale bounds must satisfy 0 < min <= max <= 1, got [{min}, {max}]")]
    InvalidScaleBounds { min: f64, max: f64 },

    #[error("Scale tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),
}

/// Parameters of the quality and resize searches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Lower quality bound, also the fallback quality.
    pub min_quality: u8,
    /// Upper quality bound.
    pub max_quality: u8,
    /// Quality for the direct attempt and the resize search.
    pub default_quality: u8,
    /// Lower scale bound, also the fallback scale.
    pub min_scale: f64,
    /// Upper scale bound.
    pub max_scale: f64,
    /// Convergence tolerance of the resize search.
    pub scale_tolerance: f64,
    /// Resampling filter for scale trials.
    pub filter: FilterType,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_quality: MIN_QUALITY,
            max_quality: MAX_QUALITY,
            default_quality: DEFAULT_WEBP_QUALITY,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            scale_tolerance: SCALE_TOLERANCE,
            filter: FilterType::Lanczos3,
        }
    }
}

impl SearchConfig {
    /// Check that the bounds describe a non-empty search.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_quality > self.max_quality || self.max_quality > 100 {
            return Err(ConfigError::InvalidQualityBounds {
                min: self.min_quality,
                max: self.max_quality,
            });
        }

        if self.default_quality > 100 {
            return Err(ConfigError::InvalidDefaultQuality(self.default_quality));
        }

        let scales_ok = self.min_scale > 0.0
            && self.min_scale <= self.max_scale
            && self.max_scale <= 1.0;
        if !scales_ok {
            return Err(ConfigError::InvalidScaleBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        if !(self.scale_tolerance > 0.0 && self.scale_tolerance.is_finite()) {
            return Err(ConfigError::InvalidTolerance(self.scale_tolerance));
        }

        Ok(())
    }
}
