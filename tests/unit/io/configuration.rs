//! Validates configuration construction and derived dimensions

use photomosaic::MosaicError;
use photomosaic::io::configuration::{MosaicConfig, default_worker_count};

#[test]
fn test_zero_parameters_are_rejected() {
    for (tile_dim, zoom, resolution) in [(0, 8, 5), (50, 0, 5), (50, 8, 0)] {
        let result = MosaicConfig::new(tile_dim, zoom, resolution, None);
        assert!(matches!(result, Err(MosaicError::InvalidParameter { .. })));
    }
}

#[test]
fn test_profile_dim_is_clamped_resolution() {
    let config = MosaicConfig::new(50, 8, 5, Some(1)).expect("valid config");
    assert_eq!(config.profile_dim(), 5);

    // Divisor larger than the tile clamps to the tile dimension
    let config = MosaicConfig::new(50, 8, 100, Some(1)).expect("valid config");
    assert_eq!(config.profile_dim(), 50);

    let config = MosaicConfig::new(50, 8, 1, Some(1)).expect("valid config");
    assert_eq!(config.profile_dim(), 1);
}

#[test]
fn test_worker_floor_is_one() {
    let config = MosaicConfig::new(50, 8, 5, Some(0)).expect("valid config");
    assert_eq!(config.workers, 1);
    assert!(config.job_queue_bound() >= 1);
}

#[test]
fn test_explicit_worker_count_is_kept() {
    let config = MosaicConfig::new(50, 8, 5, Some(6)).expect("valid config");
    assert_eq!(config.workers, 6);
}

#[test]
fn test_default_worker_count_is_positive() {
    assert!(default_worker_count() >= 1);
}

#[test]
fn test_default_configuration_matches_constants() {
    let config = MosaicConfig::default();
    assert_eq!(config.tile_dim, 50);
    assert_eq!(config.zoom, 8);
    assert_eq!(config.resolution, 5);
    assert!(config.workers >= 1);
}
