//! Result types returned to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::ConfigError;
use super::trial::EncodeTrial;
use crate::decode::DecodeError;
use crate::encode::{EncodeError, OutputFormat};

/// Which phase produced the emitted buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Encoded as-is at default settings.
    Direct,
    /// Full resolution at a reduced quality.
    Quality,
    /// Downscaled at a fixed quality.
    Resize,
    /// Smallest scale at the lowest quality; emitted unconditionally.
    Fallback,
}

/// Errors from target-size encoding.
///
/// Missing the byte budget is not an error; see [`FitReport::met_budget`].
#[derive(Debug, Error)]
pub enum FitError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The image has no pixels to encode.
    #[error("Cannot fit an empty {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },

    /// Even the fallback encode was rejected, so nothing can be emitted.
    #[error("No encodable trial: {0}")]
    NoEncodableTrial(#[source] EncodeError),
}

/// Metadata describing how a target-size request was satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub format: OutputFormat,
    /// `None` for formats without a quality knob.
    pub quality_used: Option<u8>,
    pub scale_used: f64,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub target_bytes: usize,
    /// False when the emitted buffer exceeds `target_bytes`.
    pub met_budget: bool,
    pub strategy: Strategy,
    /// Encode attempts across all phases.
    pub trials: u32,
}

/// Encoded output plus its report.
#[derive(Debug, Clone)]
pub struct FitResult {
    pub bytes: Vec<u8>,
    pub report: FitReport,
}

impl FitResult {
    pub(crate) fn from_trial(
        trial: EncodeTrial,
        format: OutputFormat,
        strategy: Strategy,
        target_bytes: usize,
        trials: u32,
    ) -> Self {
        let (width, height) = trial.dimensions();
        let report = FitReport {
            format,
            quality_used: trial.quality(),
            scale_used: trial.scale(),
            width,
            height,
            size_bytes: trial.size(),
            target_bytes,
            met_budget: trial.fits(target_bytes),
            strategy,
            trials,
        };
        Self {
            bytes: trial.into_bytes(),
            report,
        }
    }

    pub fn met_budget(&self) -> bool {
        self.report.met_budget
    }
}
