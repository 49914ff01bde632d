//! Run configuration and default tuning values

use crate::io::error::{Result, invalid_parameter};

/// Default height and width in pixels of one mosaic tile
pub const TILE_DIM: u32 = 50;

/// Default upscale factor applied to the target before gridding
///
/// Controls mosaic resolution relative to the target: each source pixel region
/// grows by this factor before being carved into tile-sized cells.
pub const ZOOM: u32 = 8;

/// Default divisor shrinking tiles and cells for matching
///
/// Profiles are compared at `tile_dim / resolution` pixels per side, so larger
/// values make matching cheaper and coarser. A value of 1 would compare at
/// full resolution; it is clamped to the tile dimension.
pub const RESOLUTION: u32 = 5;

/// Default output file written to the working directory
pub const OUT_FILE: &str = "mosaic_image.jpeg";

/// Bound on the job queue, as a multiple of the worker count
pub const JOB_QUEUE_FACTOR: usize = 1;

/// Immutable per-run configuration passed into each component
///
/// Replaces process-wide tuning globals so concurrent runs and tests can use
/// different settings side by side.
#[derive(Debug, Clone, Copy)]
pub struct MosaicConfig {
    /// Height and width in pixels of one tile and one grid cell
    pub tile_dim: u32,
    /// Upscale factor applied to the target before gridding
    pub zoom: u32,
    /// Resolution divisor used to shrink cells and tiles before matching
    pub resolution: u32,
    /// Number of matcher worker threads
    pub workers: usize,
}

impl MosaicConfig {
    /// Build a validated configuration
    ///
    /// A `workers` value of `None` selects available parallelism minus one,
    /// floor 1, leaving a core free for the dispatcher and assembler.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MosaicError::InvalidParameter`] if `tile_dim`, `zoom`,
    /// or `resolution` is zero.
    pub fn new(tile_dim: u32, zoom: u32, resolution: u32, workers: Option<usize>) -> Result<Self> {
        if tile_dim == 0 {
            return Err(invalid_parameter(
                "tile_dim",
                &tile_dim,
                &"tile dimension must be at least 1 pixel",
            ));
        }
        if zoom == 0 {
            return Err(invalid_parameter(
                "zoom",
                &zoom,
                &"zoom factor must be at least 1",
            ));
        }
        if resolution == 0 {
            return Err(invalid_parameter(
                "resolution",
                &resolution,
                &"resolution divisor must be at least 1",
            ));
        }

        Ok(Self {
            tile_dim,
            zoom,
            resolution,
            workers: workers.unwrap_or_else(default_worker_count).max(1),
        })
    }

    /// Pixels per side of a downsampled profile
    ///
    /// This is the resolution divisor clamped to `[1, tile_dim]`: a tile is
    /// shrunk by the factor `tile_dim / profile_dim` for matching, so the
    /// profile is never larger than the tile and never zero-sized.
    pub const fn profile_dim(&self) -> u32 {
        let clamped = if self.resolution < self.tile_dim {
            self.resolution
        } else {
            self.tile_dim
        };
        if clamped == 0 { 1 } else { clamped }
    }

    /// Capacity of the bounded job queue
    pub const fn job_queue_bound(&self) -> usize {
        self.workers * JOB_QUEUE_FACTOR
    }
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            tile_dim: TILE_DIM,
            zoom: ZOOM,
            resolution: RESOLUTION,
            workers: default_worker_count(),
        }
    }
}

/// Worker pool size: available parallelism minus one, floor 1
pub fn default_worker_count() -> usize {
    let available = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1);
    available.saturating_sub(1).max(1)
}
