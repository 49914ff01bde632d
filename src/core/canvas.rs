//! Output canvas and grid cell coordinates
//!
//! The canvas is the mosaic under construction: a full-resolution pixel buffer
//! covering a whole number of grid cells. It is owned exclusively by the
//! assembler thread, which pastes one tile at a time, so no locking is needed
//! around pixel writes.

use crate::core::profile::Pixel;
use image::{Rgb, RgbImage};

/// Grid-aligned cell rectangle in full-resolution target coordinates
///
/// Always exactly `tile_dim` pixels on each side; `x1`/`y1` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellLocation {
    /// Left edge (inclusive)
    pub x0: u32,
    /// Top edge (inclusive)
    pub y0: u32,
    /// Right edge (exclusive)
    pub x1: u32,
    /// Bottom edge (exclusive)
    pub y1: u32,
}

impl CellLocation {
    /// Construct the cell at grid position (`grid_x`, `grid_y`)
    pub const fn at_grid(grid_x: u32, grid_y: u32, tile_dim: u32) -> Self {
        Self {
            x0: grid_x * tile_dim,
            y0: grid_y * tile_dim,
            x1: (grid_x + 1) * tile_dim,
            y1: (grid_y + 1) * tile_dim,
        }
    }
}

/// Mutable full-resolution output buffer sized to a whole number of cells
///
/// Dimensions are the target's upscaled dimensions floor-truncated to complete
/// cells; partial cells at the right and bottom edges are never processed.
#[derive(Debug)]
pub struct Canvas {
    image: RgbImage,
    x_count: u32,
    y_count: u32,
    tile_dim: u32,
}

impl Canvas {
    /// Create a blank canvas covering the target's complete grid cells
    pub fn new(target_width: u32, target_height: u32, tile_dim: u32) -> Self {
        let x_count = target_width / tile_dim;
        let y_count = target_height / tile_dim;
        Self {
            image: RgbImage::new(x_count * tile_dim, y_count * tile_dim),
            x_count,
            y_count,
            tile_dim,
        }
    }

    /// Number of grid cells along the horizontal axis
    pub const fn x_count(&self) -> u32 {
        self.x_count
    }

    /// Number of grid cells along the vertical axis
    pub const fn y_count(&self) -> u32 {
        self.y_count
    }

    /// Total number of grid cells
    pub const fn total_cells(&self) -> u32 {
        self.x_count * self.y_count
    }

    /// Paste a tile's full-resolution pixel buffer at a cell location
    ///
    /// `pixels` is row-major at `tile_dim * tile_dim`. Writes outside the
    /// canvas bounds are ignored; they cannot occur for locations produced by
    /// grid enumeration.
    pub fn paste(&mut self, pixels: &[Pixel], location: CellLocation) {
        for row in 0..self.tile_dim {
            for col in 0..self.tile_dim {
                let Some(&rgb) = pixels.get((row * self.tile_dim + col) as usize) else {
                    continue;
                };
                let x = location.x0 + col;
                let y = location.y0 + row;
                if x < self.image.width() && y < self.image.height() {
                    self.image.put_pixel(x, y, Rgb(rgb));
                }
            }
        }
    }

    /// Hand the finished pixel buffer to an image encoder
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
