//! Folder batch processing.
//!
//! Every regular file directly inside the input folder is handled by
//! extension: PNGs are fitted under the byte target, JPEGs are converted
//! to WebP for display, and anything else is skipped. A failing file is
//! logged and counted; it never stops the batch.
//!
//! Two inputs can map to the same output name (`hero.jpg` and an opaque
//! `hero.png` both become `hero.webp`). The first one in name order keeps
//! the name; later ones fail instead of overwriting it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sizefit_core::convert::{convert_to_webp, ConvertConfig};
use sizefit_core::decode::decode_image;
use sizefit_core::encode::OutputFormat;
use sizefit_core::fit::{FitReport, SearchConfig, TargetSizeEncoder};

/// Default byte target for fitted images, in KiB.
pub const DEFAULT_TARGET_KB: usize = 20;

/// Settings for a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub target_bytes: usize,
    pub search: SearchConfig,
    pub convert: ConvertConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            target_bytes: DEFAULT_TARGET_KB * 1024,
            search: SearchConfig::default(),
            convert: ConvertConfig::default(),
        }
    }
}

/// What happens to a file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    /// Encode under the byte target.
    Fit,
    /// Fixed-quality WebP conversion.
    Convert,
}

impl Job {
    /// Case-insensitive: `.png` fits, `.jpg` and `.jpeg` convert.
    pub fn for_path(path: &Path) -> Option<Job> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Job::Fit),
            "jpg" | "jpeg" => Some(Job::Convert),
            _ => None,
        }
    }
}

/// Result of one successfully processed file.
#[derive(Debug, Clone)]
pub enum Outcome {
    Fitted { output: PathBuf, report: FitReport },
    Converted { output: PathBuf, size_bytes: usize },
}

impl Outcome {
    pub fn output(&self) -> &Path {
        match self {
            Outcome::Fitted { output, .. } | Outcome::Converted { output, .. } => output,
        }
    }
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub fitted: usize,
    /// Fitted files emitted above the target.
    pub over_budget: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.fitted + self.converted
    }

    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Fitted { report, .. } => {
                self.fitted += 1;
                if !report.met_budget {
                    self.over_budget += 1;
                }
            }
            Outcome::Converted { .. } => self.converted += 1,
        }
    }
}

/// Convert a target in KiB to bytes.
pub fn kib_to_bytes(kib: usize) -> Result<usize> {
    match kib.checked_mul(1024) {
        Some(bytes) => Ok(bytes),
        None => bail!("Target of {} KiB is too large", kib),
    }
}

/// `<output_dir>/<stem of input>.<extension>`
pub fn output_path(output_dir: &Path, input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.{}", stem, extension))
}

/// Process every recognized file in `input_dir`, writing results to
/// `output_dir` (created if missing).
///
/// Only an unreadable input folder or an uncreatable output folder is an
/// error; per-file failures are logged and counted in the summary.
pub fn process_folder(
    input_dir: &Path,
    output_dir: &Path,
    config: &BatchConfig,
) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder {}", output_dir.display()))?;

    let mut inputs: Vec<PathBuf> = fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input folder {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    inputs.sort();

    let encoder = TargetSizeEncoder::new(config.search.clone())?;
    let mut summary = BatchSummary::default();
    let mut written = HashSet::new();

    for path in &inputs {
        let Some(job) = Job::for_path(path) else {
            log::debug!("Skipping {}", path.display());
            summary.skipped += 1;
            continue;
        };

        match process_file(path, output_dir, job, &encoder, config, &mut written) {
            Ok(outcome) => {
                log::info!("{} -> {}", path.display(), outcome.output().display());
                summary.record(&outcome);
            }
            Err(err) => {
                log::error!("Error processing {}: {:#}", path.display(), err);
                summary.failed += 1;
            }
        }
    }

    log::info!(
        "Image processing completed: {} fitted ({} over target), {} converted, {} skipped, {} failed",
        summary.fitted,
        summary.over_budget,
        summary.converted,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

/// Process a single file and write its output.
///
/// `written` holds the outputs of this batch so far; an input whose output
/// is already in it fails without touching the existing file.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    job: Job,
    encoder: &TargetSizeEncoder,
    config: &BatchConfig,
    written: &mut HashSet<PathBuf>,
) -> Result<Outcome> {
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let image = decode_image(&bytes)?;

    let outcome = match job {
        Job::Fit => {
            let result = encoder.encode(&image, config.target_bytes)?;
            let output = output_path(output_dir, input, result.report.format.extension());
            if !result.met_budget() {
                log::warn!(
                    "{}: {} bytes exceeds the {} byte target at the smallest settings",
                    input.display(),
                    result.report.size_bytes,
                    config.target_bytes
                );
            }
            claim_output(written, &output)?;
            write_output(&output, &result.bytes)?;
            Outcome::Fitted {
                output,
                report: result.report,
            }
        }
        Job::Convert => {
            let converted = convert_to_webp(&image, &config.convert)?;
            let output = output_path(output_dir, input, OutputFormat::WebP.extension());
            claim_output(written, &output)?;
            write_output(&output, &converted.bytes)?;
            Outcome::Converted {
                output,
                size_bytes: converted.bytes.len(),
            }
        }
    };
    Ok(outcome)
}

fn claim_output(written: &mut HashSet<PathBuf>, output: &Path) -> Result<()> {
    if !written.insert(output.to_path_buf()) {
        bail!(
            "{} was already written by another input in this batch",
            output.display()
        );
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
