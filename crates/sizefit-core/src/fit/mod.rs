//! Target-size encoding.
//!
//! Given a decoded image and a byte budget, produce an encoding within the
//! budget while keeping as much fidelity as possible. Two levers are used,
//! in order:
//!
//! 1. **Direct** - encode as-is at default settings
//! 2. **Quality** - binary-search the lossy quality at full resolution
//!    (skipped for formats without a quality knob)
//! 3. **Resize** - binary-search a uniform scale factor at fixed quality
//! 4. **Fallback** - smallest scale at the lowest quality, flagged as not
//!    meeting the budget when it doesn't
//!
//! All work is synchronous and bounded: about 7 probes per search with the
//! default bounds.
//!
//! # Examples
//!
//! ```ignore
//! use sizefit_core::fit::{SearchConfig, TargetSizeEncoder};
//!
//! let encoder = TargetSizeEncoder::new(SearchConfig::default()).unwrap();
//! let result = encoder.encode(&image, 20 * 1024).unwrap();
//! if !result.report.met_budget {
//!     eprintln!("over budget: {} bytes", result.report.size_bytes);
//! }
//! ```

mod config;
mod encoder;
mod report;
mod search;
mod trial;

pub use config::{
    ConfigError, SearchConfig, MAX_QUALITY, MAX_SCALE, MIN_QUALITY, MIN_SCALE, SCALE_TOLERANCE,
};
pub use encoder::TargetSizeEncoder;
pub use report::{FitError, FitReport, FitResult, Strategy};
pub use search::{search_max_feasible, QualityRange, ScaleRange, SearchOutcome, SearchSpace};
pub use trial::{run_trial, Codec, EncodeRequest, EncodeTrial, ImageCodec};
