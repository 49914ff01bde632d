//! Command-line interface for mosaic generation

use crate::core::index::CandidateIndex;
use crate::core::pipeline::MosaicPipeline;
use crate::io::configuration::{MosaicConfig, OUT_FILE, RESOLUTION, TILE_DIM, ZOOM};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_canvas, load_target, load_tile_library};
use crate::io::progress::ProgressTracker;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Build a photo-mosaic of a target image from a directory of tile images"
)]
/// Command-line arguments for the mosaic generator
pub struct Cli {
    /// Target image to approximate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory of candidate tile images, searched recursively
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = OUT_FILE)]
    pub output: PathBuf,

    /// Pixels per side of one mosaic tile and grid cell
    #[arg(short, long, default_value_t = TILE_DIM)]
    pub tile_size: u32,

    /// Upscale factor applied to the target before gridding
    #[arg(short, long, default_value_t = ZOOM)]
    pub zoom: u32,

    /// Resolution divisor used to shrink tiles and cells for matching
    #[arg(short, long, default_value_t = RESOLUTION)]
    pub resolution: u32,

    /// Number of matcher worker threads (default: available cores minus one)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Shrink the target by this factor in (0, 1] before processing
    #[arg(short, long)]
    pub prescale: Option<f64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates one mosaic run: load, match, assemble, export
pub struct MosaicRunner {
    cli: Cli,
    progress: Option<ProgressTracker>,
}

impl MosaicRunner {
    /// Create a runner from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressTracker::new);
        Self { cli, progress }
    }

    /// Generate the mosaic and write it to the output path
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the target cannot be
    /// loaded, no usable tiles are found, the pipeline fails, or the output
    /// cannot be written.
    pub fn run(&self) -> Result<()> {
        let start_time = Instant::now();

        let config = MosaicConfig::new(
            self.cli.tile_size,
            self.cli.zoom,
            self.cli.resolution,
            self.cli.workers,
        )?;
        if let Some(factor) = self.cli.prescale {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(invalid_parameter(
                    "prescale",
                    &factor,
                    &"prescale factor must be in (0, 1]",
                ));
            }
        }

        let target = load_target(&self.cli.target, &config, self.cli.prescale)?;

        let tiles = load_tile_library(&self.cli.tiles, &config, self.progress.as_ref())?;
        if let Some(ref tracker) = self.progress {
            tracker.finish_scan(tiles.len());
        }
        let index = Arc::new(CandidateIndex::new(tiles)?);

        let pipeline = MosaicPipeline::new(config, index);
        if let Some(ref tracker) = self.progress {
            let cells = u64::from(target.width / config.tile_dim)
                * u64::from(target.height / config.tile_dim);
            tracker.start_matching(cells);
        }

        let canvas = pipeline.run(
            &target.small,
            target.width,
            target.height,
            self.progress.as_ref(),
        )?;

        if let Some(ref tracker) = self.progress {
            tracker.finish();
        }

        export_canvas(canvas, &self.cli.output)?;

        if !self.cli.quiet {
            eprintln!(
                "Finished in {:.1?}, output is in {}",
                start_time.elapsed(),
                self.cli.output.display()
            );
        }

        Ok(())
    }
}
