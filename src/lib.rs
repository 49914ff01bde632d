//! Concurrent photo-mosaic generation from a library of candidate tile images
//!
//! The system partitions a target image into a grid of fixed-size cells and
//! replaces each cell with the candidate tile whose downsampled color profile
//! is closest by squared RGB distance. Matching runs on a pool of worker
//! threads fed from a bounded job queue while an assembler thread composites
//! results into the output canvas.

#![forbid(unsafe_code)]

/// Core pipeline: color profiles, candidate search, canvas, and the worker pool
pub mod core;
/// Input/output operations, configuration, and error handling
pub mod io;

pub use io::error::{MosaicError, Result};
