//! Input/output operations and supporting infrastructure
//!
//! This module contains everything around the matching core:
//! - Command-line interface and run orchestration
//! - Run configuration and defaults
//! - Error types
//! - Image preprocessing and export
//! - Progress display

/// Command-line interface and run orchestration
pub mod cli;
/// Run configuration and default tuning values
pub mod configuration;
/// Error types for mosaic generation
pub mod error;
/// Image preprocessing and export
pub mod image;
/// Progress display for tile scanning and cell matching
pub mod progress;
