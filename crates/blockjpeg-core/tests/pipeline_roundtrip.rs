//! End-to-end runs through decode, the block engine, and encode.

use std::path::Path;

use blockjpeg_core::decode::{decode_bytes, decode_file};
use blockjpeg_core::encode::{encode_to_bytes, encode_to_path};
use blockjpeg_core::{
    compress, compress_batch, compress_bytes, compress_file, CompressError, CompressionConfig,
    PipelineError, PixelGrid,
};
use image::ImageFormat;

/// A 40x36 RGB test card with gradients and hard edges.
fn test_card() -> PixelGrid {
    let (height, width) = (36, 40);
    let mut data = Vec::with_capacity(height * width * 3);
    for r in 0..height {
        for c in 0..width {
            let stripe = if (c / 5) % 2 == 0 { 220 } else { 30 };
            data.push(stripe);
            data.push((r * 7) as u8);
            data.push(((r + c) * 3) as u8);
        }
    }
    PixelGrid::new(height, width, 3, data).unwrap()
}

fn write_source(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    encode_to_path(&test_card(), 95, &path).unwrap();
    path
}

#[test]
fn compress_file_writes_default_named_output() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "card.jpg");

    let written = compress_file(&source, None, 25.0).unwrap();
    assert_eq!(written, dir.path().join("card_compressed_q25.jpg"));

    let output = decode_file(&written).unwrap();
    assert_eq!(output.format, ImageFormat::Jpeg);
    assert_eq!(output.grid.height(), 36);
    assert_eq!(output.grid.width(), 40);
    assert_eq!(output.grid.channels(), 3);
}

#[test]
fn compress_file_honours_explicit_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "card.png");
    let destination = dir.path().join("out.png");

    let written = compress_file(&source, Some(&destination), 60.0).unwrap();
    assert_eq!(written, destination);

    // PNG output is lossless, so the file holds exactly the engine's pixels
    let expected = compress(decode_file(&source).unwrap().grid, 60.0).unwrap();
    assert_eq!(decode_file(&written).unwrap().grid, expected);
}

#[test]
fn compress_file_rejects_bad_quality_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "card.jpg");

    let result = compress_file(&source, None, 150.0);
    assert!(matches!(
        result,
        Err(PipelineError::Compress(CompressError::InvalidQuality { .. }))
    ));
    assert!(!dir.path().join("card_compressed_q150.jpg").exists());
}

#[test]
fn compress_file_surfaces_decode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("broken.jpg");
    std::fs::write(&source, b"\xFF\xD8 definitely not a jpeg").unwrap();

    let result = compress_file(&source, None, 50.0);
    assert!(matches!(result, Err(PipelineError::Decode(_))));
}

#[test]
fn compress_file_surfaces_encode_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "card.jpg");
    let destination = dir.path().join("out.unknownext");

    let result = compress_file(&source, Some(&destination), 50.0);
    assert!(matches!(result, Err(PipelineError::Encode(_))));
}

#[test]
fn batch_writes_every_quality_and_reports_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(dir.path(), "card.jpg");
    let out_dir = dir.path().join("outputs");

    let mut config = CompressionConfig::default();
    config.output_dir = Some(out_dir.clone());

    let report = compress_batch(&source, &config).unwrap();
    let original_size = std::fs::metadata(&source).unwrap().len();

    assert_eq!(report.original_size, original_size);
    assert!(!report.needs_optimization);
    assert_eq!(report.results.len(), 3);

    for (result, quality) in report.results.iter().zip([25.0, 50.0, 75.0]) {
        assert_eq!(result.quality, quality);
        assert_eq!(
            result.output_path,
            out_dir.join(format!("card_compressed_q{quality}.jpg"))
        );
        assert!(result.output_path.exists());
        assert_eq!(
            result.compressed_size,
            std::fs::metadata(&result.output_path).unwrap().len()
        );
        assert_eq!(result.original_size, original_size);
    }

    // Lower quality never yields a larger file for this source
    assert!(report.results[0].compressed_size <= report.results[2].compressed_size);
}

#[test]
fn compress_bytes_keeps_source_format() {
    let png = encode_to_bytes(&test_card(), ImageFormat::Png, 100).unwrap();
    let out = compress_bytes(&png, 40.0).unwrap();
    let decoded = decode_bytes(&out).unwrap();
    assert_eq!(decoded.format, ImageFormat::Png);
    assert_eq!(decoded.grid, compress(test_card(), 40.0).unwrap());
}

#[test]
fn detail_loss_shrinks_as_quality_rises() {
    // Only a trend: neighbouring qualities can invert by a small margin
    let card = test_card();
    let mut previous = f64::INFINITY;
    for quality in [2.0, 10.0, 30.0, 60.0, 90.0, 100.0] {
        let out = compress(card.clone(), quality).unwrap();
        let mad = card.mean_absolute_difference(&out).unwrap();
        assert!(mad <= previous, "quality {quality}: {mad} > {previous}");
        previous = mad;
    }
}

#[test]
fn grayscale_source_stays_grayscale() {
    let dir = tempfile::tempdir().unwrap();
    let grid = PixelGrid::filled(9, 9, 1, 200).unwrap();
    let source = dir.path().join("gray.png");
    encode_to_path(&grid, 100, &source).unwrap();

    let written = compress_file(&source, None, 100.0).unwrap();
    let output = decode_file(&written).unwrap();
    assert_eq!(output.grid.channels(), 1);
    for &v in output.grid.as_raw() {
        assert!((v as i32 - 200).abs() <= 4);
    }
}
