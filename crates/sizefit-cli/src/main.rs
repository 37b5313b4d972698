use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sizefit_cli::batch::{kib_to_bytes, process_folder, BatchConfig, DEFAULT_TARGET_KB};
use sizefit_core::convert::ConvertConfig;
use sizefit_core::fit::{SearchConfig, MAX_QUALITY, MIN_QUALITY};

/// Shrink a folder of images for the web:
/// - PNG: encoded under a size target (PNG if transparent or paletted, otherwise WebP)
/// - JPEG: converted to WebP and fitted into a display box
#[derive(Parser, Debug)]
#[command(name = "sizefit")]
#[command(about = "Fit PNGs under a size target and convert JPEGs to WebP")]
struct Args {
    /// Folder to read images from (not recursive)
    input_dir: PathBuf,

    /// Folder to write results to (created if missing)
    output_dir: PathBuf,

    /// Size target for PNG inputs, in KiB
    #[arg(short, long, default_value_t = DEFAULT_TARGET_KB)]
    target_kb: usize,

    /// Lowest quality the search may use
    #[arg(long, default_value_t = MIN_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    min_quality: u8,

    /// Highest quality the search may use
    #[arg(long, default_value_t = MAX_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    max_quality: u8,

    /// WebP quality for converted JPEGs
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u8).range(0..=100))]
    webp_quality: u8,

    /// Maximum width of converted JPEGs
    #[arg(long, default_value_t = 1920)]
    max_width: u32,

    /// Maximum height of converted JPEGs
    #[arg(long, default_value_t = 1080)]
    max_height: u32,
}

impl Args {
    fn to_config(&self) -> Result<BatchConfig> {
        Ok(BatchConfig {
            target_bytes: kib_to_bytes(self.target_kb)?,
            search: SearchConfig {
                min_quality: self.min_quality,
                max_quality: self.max_quality,
                ..Default::default()
            },
            convert: ConvertConfig {
                quality: self.webp_quality,
                max_width: self.max_width,
                max_height: self.max_height,
                ..Default::default()
            },
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config()?;
    config.search.validate()?;

    process_folder(&args.input_dir, &args.output_dir, &config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Result<Args, clap::Error> {
        let mut argv = vec!["sizefit", "in", "out"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap().to_config().unwrap();

        assert_eq!(config.target_bytes, 20 * 1024);
        assert_eq!(config.search.min_quality, 10);
        assert_eq!(config.search.max_quality, 90);
        assert_eq!(config.convert.quality, 80);
        assert_eq!((config.convert.max_width, config.convert.max_height), (1920, 1080));
    }

    #[test]
    fn test_quality_flags_are_range_checked() {
        assert!(parse(&["--webp-quality", "100"]).is_ok());
        assert!(parse(&["--webp-quality", "101"]).is_err());
        assert!(parse(&["--webp-quality", "255"]).is_err());
        assert!(parse(&["--max-quality", "150"]).is_err());
        assert!(parse(&["--min-quality", "101"]).is_err());
    }

    #[test]
    fn test_oversized_target_is_an_error() {
        let huge = usize::MAX.to_string();
        let args = parse(&["--target-kb", &huge]).unwrap();
        assert!(args.to_config().is_err());
    }
}
