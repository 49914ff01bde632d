//! Validates canvas grid truncation and tile pasting

use photomosaic::core::{Canvas, CellLocation};

#[test]
fn test_cell_location_at_grid() {
    let location = CellLocation::at_grid(2, 3, 50);
    assert_eq!(location.x0, 100);
    assert_eq!(location.y0, 150);
    assert_eq!(location.x1, 150);
    assert_eq!(location.y1, 200);
}

#[test]
fn test_grid_counts_truncate_partial_cells() {
    // 130x80 with 50px cells: only 2x1 complete cells
    let canvas = Canvas::new(130, 80, 50);
    assert_eq!(canvas.x_count(), 2);
    assert_eq!(canvas.y_count(), 1);
    assert_eq!(canvas.total_cells(), 2);

    let image = canvas.into_image();
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 50);
}

#[test]
fn test_exact_multiple_dimensions() {
    let canvas = Canvas::new(100, 100, 50);
    assert_eq!(canvas.x_count(), 2);
    assert_eq!(canvas.y_count(), 2);
    assert_eq!(canvas.total_cells(), 4);
}

#[test]
fn test_paste_writes_tile_at_location() {
    let mut canvas = Canvas::new(4, 4, 2);
    let red = vec![[255, 0, 0]; 4];

    canvas.paste(&red, CellLocation::at_grid(1, 0, 2));

    let image = canvas.into_image();
    // Pasted cell is red
    assert_eq!(image.get_pixel(2, 0).0, [255, 0, 0]);
    assert_eq!(image.get_pixel(3, 1).0, [255, 0, 0]);
    // Untouched cells remain black
    assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    assert_eq!(image.get_pixel(1, 3).0, [0, 0, 0]);
}

#[test]
fn test_paste_overwrites_previous_tile() {
    let mut canvas = Canvas::new(2, 2, 2);
    let location = CellLocation::at_grid(0, 0, 2);

    canvas.paste(&vec![[10, 10, 10]; 4], location);
    canvas.paste(&vec![[200, 0, 0]; 4], location);

    let image = canvas.into_image();
    assert_eq!(image.get_pixel(1, 1).0, [200, 0, 0]);
}
