//! Matching and assembly pipeline
//!
//! This module contains the mosaic core:
//! - Downsampled color profiles and the bounded similarity metric
//! - Candidate tile index with best-match search
//! - Output canvas with grid-aligned tile pasting
//! - Dispatcher / worker pool / assembler threads and their termination protocol

/// Output canvas and grid cell coordinates
pub mod canvas;
/// Candidate tile storage and best-match search
pub mod index;
/// Concurrent match dispatch and result assembly
pub mod pipeline;
/// Color profiles and the similarity metric
pub mod profile;

pub use canvas::{Canvas, CellLocation};
pub use index::{CandidateIndex, Tile};
pub use profile::{ColorProfile, Pixel};
