use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbImage, RgbaImage};
use sizefit_cli::batch::{process_folder, BatchConfig, BatchSummary};
use sizefit_core::convert::ConvertConfig;
use tempfile::TempDir;

fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 4) as u8, (y * 4) as u8, 128])
    }))
}

fn gradient_rgba(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x * 8) as u8, 64, (y * 8) as u8, (x * 8) as u8])
    }))
}

fn noise_rgb(width: u32, height: u32) -> DynamicImage {
    let mut state = 0x2545_f491u32;
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
        let mut px = [0u8; 3];
        for c in &mut px {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *c = state as u8;
        }
        image::Rgb(px)
    }))
}

fn save(dir: &Path, name: &str, img: &DynamicImage) {
    img.save(dir.join(name)).unwrap();
}

#[test]
fn test_mixed_folder() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    save(input.path(), "banner.png", &gradient_rgb(64, 64));
    save(input.path(), "icon.png", &gradient_rgba(32, 32));
    save(input.path(), "photo.jpg", &gradient_rgb(200, 100));
    fs::write(input.path().join("notes.txt"), "not an image").unwrap();
    fs::write(input.path().join("broken.png"), b"\x89PNG garbage").unwrap();
    fs::create_dir(input.path().join("nested")).unwrap();

    let config = BatchConfig {
        convert: ConvertConfig {
            max_width: 100,
            max_height: 100,
            ..Default::default()
        },
        ..Default::default()
    };
    let summary = process_folder(input.path(), output.path(), &config).unwrap();

    assert_eq!(
        summary,
        BatchSummary {
            fitted: 2,
            over_budget: 0,
            converted: 1,
            skipped: 1,
            failed: 1,
        }
    );
    assert_eq!(summary.processed(), 3);

    // Opaque source becomes WebP, alpha source stays PNG.
    let banner = fs::read(output.path().join("banner.webp")).unwrap();
    assert_eq!(&banner[0..4], b"RIFF");
    assert!(banner.len() <= config.target_bytes);

    let icon = image::open(output.path().join("icon.png")).unwrap();
    assert!(icon.color().has_alpha());

    let photo = image::open(output.path().join("photo.webp")).unwrap();
    assert_eq!((photo.width(), photo.height()), (100, 50));

    assert!(!output.path().join("broken.png").exists());
    assert!(!output.path().join("notes.webp").exists());
}

#[test]
fn test_same_stem_does_not_overwrite() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    // both map to hero.webp; the JPEG sorts first and keeps the name
    save(input.path(), "hero.jpg", &gradient_rgb(200, 100));
    save(input.path(), "hero.png", &gradient_rgb(64, 64));
    // alpha keeps .png, so this pair does not clash
    save(input.path(), "logo.jpg", &gradient_rgb(40, 20));
    save(input.path(), "logo.png", &gradient_rgba(16, 16));

    let summary = process_folder(input.path(), output.path(), &BatchConfig::default()).unwrap();

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.fitted, 1);
    assert_eq!(summary.failed, 1);

    let hero = image::open(output.path().join("hero.webp")).unwrap();
    assert_eq!((hero.width(), hero.height()), (200, 100));
    assert!(output.path().join("logo.webp").is_file());
    assert!(output.path().join("logo.png").is_file());
}

#[test]
fn test_unreachable_target_still_writes_output() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    save(input.path(), "noise.png", &noise_rgb(48, 48));

    let config = BatchConfig {
        target_bytes: 1,
        ..Default::default()
    };
    let summary = process_folder(input.path(), output.path(), &config).unwrap();

    assert_eq!(summary.fitted, 1);
    assert_eq!(summary.over_budget, 1);
    assert_eq!(summary.failed, 0);

    let written = image::open(output.path().join("noise.webp")).unwrap();
    // Fallback runs at the minimum scale of 0.1.
    assert_eq!((written.width(), written.height()), (5, 5));
}

#[test]
fn test_output_folder_is_created() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let nested = output.path().join("a").join("b");
    save(input.path(), "icon.png", &gradient_rgba(16, 16));

    let summary = process_folder(input.path(), &nested, &BatchConfig::default()).unwrap();

    assert_eq!(summary.fitted, 1);
    assert!(nested.join("icon.png").is_file());
}

#[test]
fn test_missing_input_folder_is_error() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("does-not-exist");

    let result = process_folder(&missing, output.path(), &BatchConfig::default());
    assert!(result.is_err());
}

#[test]
fn test_empty_folder() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let summary = process_folder(input.path(), output.path(), &BatchConfig::default()).unwrap();
    assert_eq!(summary, BatchSummary::default());
}
