//! Validates candidate index construction and best-match search

use photomosaic::MosaicError;
use photomosaic::core::{CandidateIndex, ColorProfile, Tile};

fn solid_tile(color: [u8; 3]) -> Tile {
    Tile {
        pixels: vec![color; 4],
        profile: ColorProfile::new(vec![color; 4]),
    }
}

#[test]
fn test_empty_library_is_rejected() {
    let result = CandidateIndex::new(Vec::new());
    assert!(matches!(result, Err(MosaicError::EmptyTileLibrary)));
}

#[test]
fn test_exact_match_wins() {
    let index = CandidateIndex::new(vec![
        solid_tile([255, 0, 0]),
        solid_tile([0, 255, 0]),
        solid_tile([0, 0, 255]),
    ])
    .expect("non-empty library");

    let query = ColorProfile::new(vec![[0, 255, 0]; 4]);
    assert_eq!(index.find_best_match(&query), 1);
}

#[test]
fn test_duplicate_exact_matches_pick_first() {
    let index = CandidateIndex::new(vec![
        solid_tile([9, 9, 9]),
        solid_tile([50, 50, 50]),
        solid_tile([50, 50, 50]),
    ])
    .expect("non-empty library");

    let query = ColorProfile::new(vec![[50, 50, 50]; 4]);
    assert_eq!(index.find_best_match(&query), 1);
}

#[test]
fn test_equal_scores_keep_insertion_order() {
    // Both candidates are equidistant from the query; the strict comparison
    // must keep the earlier one
    let index = CandidateIndex::new(vec![
        solid_tile([100, 0, 0]),
        solid_tile([120, 0, 0]),
    ])
    .expect("non-empty library");

    let query = ColorProfile::new(vec![[110, 0, 0]; 4]);
    assert_eq!(index.find_best_match(&query), 0);
}

#[test]
fn test_nearest_neighbour_selection() {
    let index = CandidateIndex::new(vec![
        solid_tile([0, 0, 0]),
        solid_tile([128, 128, 128]),
        solid_tile([255, 255, 255]),
    ])
    .expect("non-empty library");

    let dark = ColorProfile::new(vec![[10, 10, 10]; 4]);
    let mid = ColorProfile::new(vec![[120, 130, 125]; 4]);
    let light = ColorProfile::new(vec![[250, 240, 255]; 4]);

    assert_eq!(index.find_best_match(&dark), 0);
    assert_eq!(index.find_best_match(&mid), 1);
    assert_eq!(index.find_best_match(&light), 2);
}

#[test]
fn test_tile_lookup() {
    let index = CandidateIndex::new(vec![solid_tile([1, 2, 3])]).expect("non-empty library");

    assert_eq!(index.len(), 1);
    assert!(!index.is_empty());
    assert!(index.tile(0).is_some());
    assert!(index.tile(1).is_none());
    let tile = index.tile(0).expect("tile present");
    assert_eq!(tile.pixels.first(), Some(&[1, 2, 3]));
}
