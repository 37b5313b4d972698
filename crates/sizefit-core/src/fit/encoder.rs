//! The target-size encoder: direct attempt, quality search, resize search,
//! fallback.
//!
//! Each phase runs only if the previous one produced no trial within the
//! byte budget. The first phase that meets the budget ends the operation.
//! Fallback always emits something.

use super::config::{ConfigError, SearchConfig};
use super::report::{FitError, FitResult, Strategy};
use super::search::{search_max_feasible, QualityRange, ScaleRange, SearchOutcome};
use super::trial::{run_trial, Codec, EncodeRequest, EncodeTrial, ImageCodec};
use crate::decode::DecodedImage;
use crate::encode::{select_format, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    DirectAttempt,
    QualitySearch,
    ResizeSearch,
    Fallback,
}

impl Phase {
    fn next(self) -> Phase {
        match self {
            Phase::DirectAttempt => Phase::QualitySearch,
            Phase::QualitySearch => Phase::ResizeSearch,
            Phase::ResizeSearch | Phase::Fallback => Phase::Fallback,
        }
    }

    fn strategy(self) -> Strategy {
        match self {
            Phase::DirectAttempt => Strategy::Direct,
            Phase::QualitySearch => Strategy::Quality,
            Phase::ResizeSearch => Strategy::Resize,
            Phase::Fallback => Strategy::Fallback,
        }
    }
}

/// Encodes images under a byte budget using quality and scale as levers.
///
/// Stateless between calls: one encoder can process any number of images,
/// and separate images share nothing.
#[derive(Debug, Clone)]
pub struct TargetSizeEncoder<C = ImageCodec> {
    config: SearchConfig,
    codec: C,
}

impl Default for TargetSizeEncoder<ImageCodec> {
    fn default() -> Self {
        Self {
            config: SearchConfig::default(),
            codec: ImageCodec,
        }
    }
}

impl TargetSizeEncoder<ImageCodec> {
    /// Create an encoder backed by the PNG/WebP codecs.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        Self::with_codec(config, ImageCodec)
    }
}

impl<C: Codec> TargetSizeEncoder<C> {
    /// Create an encoder backed by a custom codec.
    pub fn with_codec(config: SearchConfig, codec: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, codec })
    }

    /// Encode `image` so the output is at most `target_bytes`, best effort.
    ///
    /// The format is chosen once from the pixel mode and never revisited.
    /// Returns a buffer even when the budget can't be met; check
    /// `report.met_budget`.
    ///
    /// # Errors
    ///
    /// Returns `FitError::EmptyImage` for an image without pixels, and
    /// `FitError::NoEncodableTrial` if the codec rejects the fallback
    /// encode, leaving nothing to emit.
    pub fn encode(&self, image: &DecodedImage, target_bytes: usize) -> Result<FitResult, FitError> {
        if image.is_empty() {
            return Err(FitError::EmptyImage {
                width: image.width,
                height: image.height,
            });
        }

        let format = select_format(image.mode);
        log::debug!(
            "fitting {}x{} {:?} image into {} bytes as {}",
            image.width,
            image.height,
            image.mode,
            target_bytes,
            format
        );

        // quality held fixed while searching scale
        let resize_quality = format.supports_quality().then_some(self.config.default_quality);

        let mut trials = 0;
        let mut phase = Phase::DirectAttempt;
        loop {
            let outcome = match phase {
                Phase::DirectAttempt => self.direct_attempt(image, format, target_bytes),
                Phase::QualitySearch if format.supports_quality() => {
                    self.quality_search(image, format, target_bytes)
                }
                Phase::QualitySearch => {
                    log::debug!("{} has no quality knob, skipping quality search", format);
                    SearchOutcome::skipped()
                }
                Phase::ResizeSearch => {
                    self.resize_search(image, format, resize_quality, target_bytes)
                }
                Phase::Fallback => {
                    let trial = self.fallback(image, format)?;
                    trials += 1;
                    log::info!(
                        "target {} bytes not reached, emitting {} bytes at scale {} quality {:?}",
                        target_bytes,
                        trial.size(),
                        trial.scale(),
                        trial.quality()
                    );
                    return Ok(FitResult::from_trial(
                        trial,
                        format,
                        Strategy::Fallback,
                        target_bytes,
                        trials,
                    ));
                }
            };

            trials += outcome.probes;

            if let Some(trial) = outcome.best_trial {
                log::info!(
                    "{:?} met {} byte target with {} bytes (quality {:?}, scale {:.3})",
                    phase.strategy(),
                    target_bytes,
                    trial.size(),
                    trial.quality(),
                    trial.scale()
                );
                return Ok(FitResult::from_trial(
                    trial,
                    format,
                    phase.strategy(),
                    target_bytes,
                    trials,
                ));
            }

            phase = phase.next();
        }
    }

    /// Encode once at full resolution and default quality.
    pub fn direct_attempt(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        target_bytes: usize,
    ) -> SearchOutcome {
        let request = EncodeRequest::new(image, format)
            .with_quality(Some(self.config.default_quality))
            .with_filter(self.config.filter);
        SearchOutcome::single(run_trial(&self.codec, &request), target_bytes)
    }

    /// Binary-search the highest quality that fits at full resolution.
    pub fn quality_search(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        target_bytes: usize,
    ) -> SearchOutcome {
        let mut range = QualityRange::new(self.config.min_quality, self.config.max_quality);

        let outcome = search_max_feasible(&mut range, target_bytes, |quality| {
            let request = EncodeRequest::new(image, format)
                .with_quality(Some(quality))
                .with_filter(self.config.filter);
            run_trial(&self.codec, &request)
        });

        debug_assert!(range.is_exhausted());
        outcome
    }

    /// Binary-search the largest scale that fits at a fixed quality.
    ///
    /// Every probe resizes the original `image`.
    pub fn resize_search(
        &self,
        image: &DecodedImage,
        format: OutputFormat,
        quality: Option<u8>,
        target_bytes: usize,
    ) -> SearchOutcome {
        let mut range = ScaleRange::new(
            self.config.min_scale,
            self.config.max_scale,
            self.config.scale_tolerance,
        );

        search_max_feasible(&mut range, target_bytes, |scale| {
            let request = EncodeRequest::new(image, format)
                .with_quality(quality)
                .with_scale(scale)
                .with_filter(self.config.filter);
            run_trial(&self.codec, &request)
        })
    }

    /// Smallest scale at the lowest quality, returned regardless of size.
    fn fallback(&self, image: &DecodedImage, format: OutputFormat) -> Result<EncodeTrial, FitError> {
        let request = EncodeRequest::new(image, format)
            .with_quality(Some(self.config.min_quality))
            .with_scale(self.config.min_scale)
            .with_filter(self.config.filter);
        run_trial(&self.codec, &request).map_err(FitError::NoEncodableTrial)
    }
}
