//! Candidate tile storage and best-match search
//!
//! The index owns every candidate tile for the whole run: the full-resolution
//! pixel buffer used for compositing and the downsampled profile used for
//! matching. It is immutable after construction and shared read-only across
//! all matcher workers.

use crate::core::profile::{ColorProfile, Pixel};
use crate::io::error::{MosaicError, Result};

/// One candidate tile: full-resolution pixels plus its matching profile
///
/// The pixel buffer is row-major at `tile_dim * tile_dim`; the profile is the
/// same image downsampled to the run's profile resolution.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Full-resolution row-major pixel buffer, used only for compositing
    pub pixels: Vec<Pixel>,
    /// Downsampled profile, used only for matching
    pub profile: ColorProfile,
}

/// Immutable collection of candidate tiles with best-match search
#[derive(Debug)]
pub struct CandidateIndex {
    tiles: Vec<Tile>,
}

impl CandidateIndex {
    /// Build an index from the loaded tile library
    ///
    /// Tile order is preserved; it determines the tie-break between candidates
    /// with equal scores.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::EmptyTileLibrary`] if `tiles` is empty, since
    /// best-match search has no valid result without candidates.
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(MosaicError::EmptyTileLibrary);
        }
        Ok(Self { tiles })
    }

    /// Number of candidate tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether the index holds no tiles (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile by the index returned from [`Self::find_best_match`]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Find the candidate whose profile is closest to `query`
    ///
    /// Linear scan in collection order, keeping a running minimum that is fed
    /// to the metric as its pruning bound. The comparison is strict, so the
    /// first tile achieving the minimal score wins; this keeps output
    /// deterministic when candidates score equally.
    pub fn find_best_match(&self, query: &ColorProfile) -> usize {
        let mut best_index = 0;
        let mut minimum = u64::MAX;

        for (index, tile) in self.tiles.iter().enumerate() {
            let score = query.distance_within(&tile.profile, minimum);
            if score < minimum {
                minimum = score;
                best_index = index;
            }
        }
        best_index
    }
}
