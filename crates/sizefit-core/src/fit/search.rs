//! Constrained binary search over a feasibility predicate.
//!
//! Both searches have the same shape: probe the midpoint of a bound, encode,
//! call the probe feasible if it fits the byte budget, and narrow the bound
//! toward higher fidelity when it fits or lower fidelity when it doesn't.
//! The search keeps the last feasible trial; because every feasible probe
//! moves the lower bound up, that is also the highest feasible parameter
//! seen.
//!
//! The searches assume size grows with the parameter. Real encoders break
//! that now and then; no re-validation is done, the last feasible trial wins.

use std::fmt;

use super::trial::EncodeTrial;
use crate::encode::EncodeError;

/// A bounded parameter range that can be bisected.
pub trait SearchSpace {
    type Value: Copy + fmt::Debug;

    /// Next value to probe, or `None` once the range is exhausted.
    fn next_probe(&self) -> Option<Self::Value>;

    /// Narrow the range after probing `value`.
    ///
    /// Feasible probes move toward larger values, infeasible ones toward
    /// smaller values.
    fn narrow(&mut self, value: Self::Value, feasible: bool);
}

/// Inclusive integer quality range `[low, high]`.
///
/// Exhausted once `low > high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    low: i16,
    high: i16,
}

impl QualityRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self {
            low: min as i16,
            high: max as i16,
        }
    }

    pub fn low(&self) -> i16 {
        self.low
    }

    pub fn high(&self) -> i16 {
        self.high
    }

    pub fn is_exhausted(&self) -> bool {
        self.low > self.high
    }
}

impl SearchSpace for QualityRange {
    type Value = u8;

    fn next_probe(&self) -> Option<u8> {
        if self.is_exhausted() {
            return None;
        }
        // both bounds are non-negative here, so division floors
        Some(((self.low + self.high) / 2) as u8)
    }

    fn narrow(&mut self, quality: u8, feasible: bool) {
        if feasible {
            self.low = quality as i16 + 1;
        } else {
            self.high = quality as i16 - 1;
        }
    }
}

/// Continuous scale range `[low, high]`, searched to a tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    low: f64,
    high: f64,
    tolerance: f64,
}

impl ScaleRange {
    pub fn new(min: f64, max: f64, tolerance: f64) -> Self {
        Self {
            low: min,
            high: max,
            tolerance,
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn is_converged(&self) -> bool {
        self.high - self.low <= self.tolerance
    }
}

impl SearchSpace for ScaleRange {
    type Value = f64;

    fn next_probe(&self) -> Option<f64> {
        if self.is_converged() {
            return None;
        }
        Some((self.low + self.high) / 2.0)
    }

    fn narrow(&mut self, scale: f64, feasible: bool) {
        if feasible {
            self.low = scale;
        } else {
            self.high = scale;
        }
    }
}

/// What a search phase produced.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Highest-fidelity feasible trial, if any probe fit.
    pub best_trial: Option<EncodeTrial>,
    /// True iff `best_trial` is present.
    pub met_budget: bool,
    /// Number of encode attempts made.
    pub probes: u32,
}

impl SearchOutcome {
    /// Outcome of a single attempt.
    pub fn single(trial: Result<EncodeTrial, EncodeError>, target: usize) -> Self {
        let best_trial = match trial {
            Ok(trial) if trial.fits(target) => Some(trial),
            Ok(_) => None,
            Err(e) => {
                log::warn!("encode attempt failed: {e}");
                None
            }
        };
        Self {
            met_budget: best_trial.is_some(),
            best_trial,
            probes: 1,
        }
    }

    /// Outcome of a phase that did not run.
    pub fn skipped() -> Self {
        Self::default()
    }
}

/// Find the largest feasible value in `space`.
///
/// `probe` encodes one trial for a value; a codec error counts as an
/// infeasible probe. A trial is feasible when its size is at most `target`.
pub fn search_max_feasible<S, F>(space: &mut S, target: usize, mut probe: F) -> SearchOutcome
where
    S: SearchSpace,
    F: FnMut(S::Value) -> Result<EncodeTrial, EncodeError>,
{
    let mut best_trial = None;
    let mut probes = 0;

    while let Some(value) = space.next_probe() {
        probes += 1;

        let feasible = match probe(value) {
            Ok(trial) => {
                let fits = trial.fits(target);
                log::debug!(
                    "probe {:?}: {} bytes (target {}), {}",
                    value,
                    trial.size(),
                    target,
                    if fits { "feasible" } else { "too large" }
                );
                if fits {
                    best_trial = Some(trial);
                }
                fits
            }
            Err(e) => {
                log::warn!("probe {:?} failed, treating as infeasible: {}", value, e);
                false
            }
        };

        space.narrow(value, feasible);
    }

    SearchOutcome {
        met_budget: best_trial.is_some(),
        best_trial,
        probes,
    }
}
