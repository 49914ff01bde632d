//! Progress display for tile scanning and cell matching
//!
//! Purely cosmetic: the tracker counts dispatched cells against the grid total
//! and shows which tile files are being scanned, but nothing in the pipeline
//! depends on it for correctness.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static CELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("Matching cells [{bar:40.cyan/blue}] {percent:>3}% ({pos}/{len})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static SCAN_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} Reading {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Counts completed dispatches out of the total grid cell count
#[derive(Debug)]
pub struct ProgressTracker {
    scan_bar: ProgressBar,
    cell_bar: ProgressBar,
    dispatched: AtomicU64,
}

impl ProgressTracker {
    /// Create a tracker with a scan spinner and an empty matching bar
    pub fn new() -> Self {
        let scan_bar = ProgressBar::new_spinner();
        scan_bar.set_style(SCAN_STYLE.clone());
        scan_bar.enable_steady_tick(Duration::from_millis(100));

        let cell_bar = ProgressBar::hidden();
        cell_bar.set_style(CELL_STYLE.clone());

        Self {
            scan_bar,
            cell_bar,
            dispatched: AtomicU64::new(0),
        }
    }

    /// Show the tile file currently being scanned
    pub fn scanned_file(&self, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.scan_bar.set_message(name);
        self.scan_bar.tick();
    }

    /// Close the scan spinner and report how many tiles were loaded
    pub fn finish_scan(&self, tile_count: usize) {
        self.scan_bar
            .finish_with_message(format!("{tile_count} tile images loaded"));
    }

    /// Start the matching bar over the total grid cell count
    pub fn start_matching(&self, total_cells: u64) {
        self.cell_bar.set_length(total_cells);
        self.cell_bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
    }

    /// Record one dispatched cell
    pub fn update(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        self.cell_bar.inc(1);
    }

    /// Number of cells dispatched so far
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Close the matching bar
    pub fn finish(&self) {
        self.cell_bar.finish();
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
