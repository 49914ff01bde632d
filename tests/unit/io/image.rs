//! Validates target preprocessing, tile library loading, and canvas export

use image::{Rgb, RgbImage};
use photomosaic::core::Canvas;
use photomosaic::io::configuration::MosaicConfig;
use photomosaic::io::image::{export_canvas, load_target, load_tile_library};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_solid_png(path: &Path, color: [u8; 3], width: u32, height: u32) {
    let mut image = RgbImage::new(width, height);
    for pixel in image.pixels_mut() {
        *pixel = Rgb(color);
    }
    image.save(path).expect("write test image");
}

#[test]
fn test_load_target_applies_zoom_and_downsample() {
    let dir = TempDir::new().expect("create temp dir");
    let target_path = dir.path().join("target.png");
    write_solid_png(&target_path, [120, 130, 140], 10, 20);

    let config = MosaicConfig::new(50, 8, 5, Some(1)).expect("valid config");
    let target = load_target(&target_path, &config, None).expect("load target");

    assert_eq!(target.width, 80);
    assert_eq!(target.height, 160);
    // Downsample shrinks by tile_dim / profile_dim = 10
    assert_eq!(target.small.width(), 8);
    assert_eq!(target.small.height(), 16);
}

#[test]
fn test_load_target_prescale_shrinks_before_zoom() {
    let dir = TempDir::new().expect("create temp dir");
    let target_path = dir.path().join("target.png");
    write_solid_png(&target_path, [0, 0, 0], 100, 40);

    let config = MosaicConfig::new(50, 2, 5, Some(1)).expect("valid config");
    let target = load_target(&target_path, &config, Some(0.5)).expect("load target");

    assert_eq!(target.width, 100);
    assert_eq!(target.height, 40);
}

#[test]
fn test_load_target_missing_file_fails() {
    let config = MosaicConfig::new(50, 8, 5, Some(1)).expect("valid config");
    let result = load_target(Path::new("/nonexistent/target.png"), &config, None);
    assert!(result.is_err());
}

#[test]
fn test_tile_library_resizes_and_sorts() {
    let dir = TempDir::new().expect("create temp dir");
    write_solid_png(&dir.path().join("b.png"), [0, 255, 0], 64, 64);
    write_solid_png(&dir.path().join("a.png"), [255, 0, 0], 30, 90);

    let config = MosaicConfig::new(50, 8, 5, Some(1)).expect("valid config");
    let tiles = load_tile_library(dir.path(), &config, None).expect("load tiles");

    assert_eq!(tiles.len(), 2);
    // Sorted path order: a.png before b.png
    assert_eq!(tiles[0].pixels.first(), Some(&[255, 0, 0]));
    assert_eq!(tiles[1].pixels.first(), Some(&[0, 255, 0]));
    // Full resolution at tile_dim², profile at profile_dim²
    assert_eq!(tiles[0].pixels.len(), 50 * 50);
    assert_eq!(tiles[0].profile.len(), 5 * 5);
}

#[test]
fn test_tile_library_walks_subdirectories() {
    let dir = TempDir::new().expect("create temp dir");
    let nested = dir.path().join("nested/deeper");
    fs::create_dir_all(&nested).expect("create nested dirs");
    write_solid_png(&nested.join("tile.png"), [1, 2, 3], 10, 10);

    let config = MosaicConfig::new(4, 1, 2, Some(1)).expect("valid config");
    let tiles = load_tile_library(dir.path(), &config, None).expect("load tiles");
    assert_eq!(tiles.len(), 1);
}

#[test]
fn test_unreadable_tiles_are_skipped_silently() {
    let dir = TempDir::new().expect("create temp dir");
    write_solid_png(&dir.path().join("good.png"), [10, 20, 30], 16, 16);
    fs::write(dir.path().join("broken.png"), b"not an image").expect("write junk file");
    fs::write(dir.path().join("notes.txt"), b"also not an image").expect("write junk file");

    let config = MosaicConfig::new(8, 1, 4, Some(1)).expect("valid config");
    let tiles = load_tile_library(dir.path(), &config, None).expect("load tiles");
    assert_eq!(tiles.len(), 1);
}

#[test]
fn test_missing_tile_directory_fails() {
    let config = MosaicConfig::new(50, 8, 5, Some(1)).expect("valid config");
    let result = load_tile_library(Path::new("/nonexistent/tiles"), &config, None);
    assert!(result.is_err());
}

#[test]
fn test_export_creates_parent_directories() {
    let dir = TempDir::new().expect("create temp dir");
    let output = dir.path().join("out/deep/mosaic.png");

    let canvas = Canvas::new(4, 4, 2);
    export_canvas(canvas, &output).expect("export canvas");

    assert!(output.exists());
    let written = image::open(&output).expect("reopen output").to_rgb8();
    assert_eq!(written.width(), 4);
    assert_eq!(written.height(), 4);
}
