//! Image preprocessing and export
//!
//! Turns filesystem images into the exact pixel data the core consumes: the
//! target becomes an upscaled dimension pair plus a downsampled rendition for
//! per-cell cropping, and every readable file under the tile directory becomes
//! a full-resolution tile with its matching profile. Files that fail to decode
//! are skipped individually so one bad image never aborts a run.

use crate::core::canvas::Canvas;
use crate::core::index::Tile;
use crate::core::profile::ColorProfile;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{MosaicError, Result};
use crate::io::progress::ProgressTracker;
use image::RgbImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};

/// Preprocessed target image handed to the pipeline
///
/// `width`/`height` are the upscaled dimensions defining the grid; the
/// upscaled pixels themselves are never materialized. `small` is the
/// downsampled rendition cropped per cell into match profiles.
#[derive(Debug)]
pub struct TargetImages {
    /// Upscaled target width in pixels
    pub width: u32,
    /// Upscaled target height in pixels
    pub height: u32,
    /// Downsampled target, `profile_dim` pixels per grid cell side
    pub small: RgbImage,
}

/// Load and preprocess the target image
///
/// An optional `prescale` factor in `(0, 1]` shrinks the target before the
/// zoom upscale, trading mosaic size for processing speed. The downsampled
/// rendition shrinks the upscaled dimensions by `tile_dim / profile_dim` so
/// each grid cell covers exactly `profile_dim` pixels per side.
///
/// # Errors
///
/// Returns [`MosaicError::ImageLoad`] if the target cannot be read or decoded.
pub fn load_target(
    path: &Path,
    config: &MosaicConfig,
    prescale: Option<f64>,
) -> Result<TargetImages> {
    let decoded = image::open(path).map_err(|source| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let mut target = decoded.to_rgb8();

    if let Some(factor) = prescale {
        let scaled_width = ((f64::from(target.width()) * factor) as u32).max(1);
        let scaled_height = ((f64::from(target.height()) * factor) as u32).max(1);
        target = imageops::resize(&target, scaled_width, scaled_height, FilterType::Lanczos3);
    }

    let width = target.width() * config.zoom;
    let height = target.height() * config.zoom;

    let small_width = (width * config.profile_dim() / config.tile_dim).max(1);
    let small_height = (height * config.profile_dim() / config.tile_dim).max(1);
    let small = imageops::resize(&target, small_width, small_height, FilterType::Lanczos3);

    Ok(TargetImages {
        width,
        height,
        small,
    })
}

/// Load every readable image under the tile directory as a candidate tile
///
/// The directory is walked recursively and the collected paths are sorted so
/// library order, and with it best-match tie-breaking, is reproducible across
/// filesystems. Unreadable or undecodable files are skipped silently; each is
/// resized to the full tile dimension and to the profile dimension.
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] if the directory itself cannot be read.
pub fn load_tile_library(
    dir: &Path,
    config: &MosaicConfig,
    progress: Option<&ProgressTracker>,
) -> Result<Vec<Tile>> {
    let mut paths = Vec::new();
    collect_files(dir, &mut paths)?;
    paths.sort();

    let tile_dim = config.tile_dim;
    let profile_dim = config.profile_dim();

    let mut tiles = Vec::new();
    for path in &paths {
        if let Some(tracker) = progress {
            tracker.scanned_file(path);
        }
        let Ok(decoded) = image::open(path) else {
            continue;
        };
        let source = decoded.to_rgb8();

        let full = imageops::resize(&source, tile_dim, tile_dim, FilterType::Lanczos3);
        let small = imageops::resize(&source, profile_dim, profile_dim, FilterType::Lanczos3);

        tiles.push(Tile {
            pixels: full.pixels().map(|p| p.0).collect(),
            profile: ColorProfile::new(small.pixels().map(|p| p.0).collect()),
        });
    }

    Ok(tiles)
}

// Depth-first traversal mirroring the recursive walk of the tile directory
fn collect_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| MosaicError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read tile directory",
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| MosaicError::FileSystem {
            path: dir.to_path_buf(),
            operation: "read tile directory entry",
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, paths)?;
        } else {
            paths.push(path);
        }
    }
    Ok(())
}

/// Persist the assembled canvas to the output destination
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be encoded and written.
pub fn export_canvas(canvas: Canvas, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| MosaicError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create output directory",
                source,
            })?;
        }
    }

    canvas
        .into_image()
        .save(output_path)
        .map_err(|source| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source,
        })
}
