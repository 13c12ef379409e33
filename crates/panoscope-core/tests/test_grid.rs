mod common;

use std::sync::Arc;

use panoscope_core::error::PanoError;
use panoscope_core::grid::{build_grid, PanoramaGeometry};
use panoscope_core::session::NoOpReporter;

use common::{small_geometry, small_store, tile_coded_image, HEIGHT, TILE_H, TILE_W, WIDTH};

/// Red channel of the tile's top-left pixel: the real column it was cut from.
fn coded_col(tile: &panoscope_core::grid::Tile) -> u8 {
    tile.pixels.get_pixel(0, 0)[0]
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_geometry_counts() {
    let g = small_geometry();
    assert_eq!(g.cols, 8);
    assert_eq!(g.rows, 2);
    assert_eq!(g.edge_cols, 2);
    assert_eq!(g.extended_cols(), 10);
    assert_eq!(g.seam_band_width(), 32);
    assert_eq!(g.extended_width(), 160);
    assert_eq!(g.tile_count(), 20);
    assert_eq!(g.lowest_row(), 1);
}

#[test]
fn test_geometry_real_column() {
    let g = small_geometry();
    assert_eq!(g.real_column(0), 6);
    assert_eq!(g.real_column(1), 7);
    assert_eq!(g.real_column(2), 0);
    assert_eq!(g.real_column(9), 7);
}

#[test]
fn test_geometry_zero_dimensions() {
    assert!(matches!(
        PanoramaGeometry::new(0, HEIGHT, TILE_W, TILE_H, 32),
        Err(PanoError::InvalidDimensions { width: 0, .. })
    ));
    assert!(matches!(
        PanoramaGeometry::new(WIDTH, 0, TILE_W, TILE_H, 32),
        Err(PanoError::InvalidDimensions { height: 0, .. })
    ));
    assert!(matches!(
        PanoramaGeometry::new(WIDTH, HEIGHT, 0, TILE_H, 32),
        Err(PanoError::InvalidConfig(_))
    ));
}

#[test]
fn test_geometry_seam_band_wider_than_image() {
    assert!(matches!(
        PanoramaGeometry::new(32, HEIGHT, TILE_W, TILE_H, 64),
        Err(PanoError::InvalidDimensions { .. })
    ));
}

// ---------------------------------------------------------------------------
// Grid building and addressing
// ---------------------------------------------------------------------------

#[test]
fn test_build_grid_tile_count() {
    let store = small_store();
    assert_eq!(store.len(), 20);
    assert_eq!(store.byte_len(), 20 * (TILE_W * TILE_H * 4) as usize);
}

#[test]
fn test_seam_band_duplicates_tail_columns() {
    let store = small_store();

    let seam = store.get(0, 0).unwrap();
    assert!(seam.seam_copy);
    assert_eq!(seam.real_col, 6);
    assert_eq!(coded_col(seam), 6);

    let real = store.get(2, 0).unwrap();
    assert!(!real.seam_copy);
    assert_eq!(real.real_col, 0);
    assert_eq!(coded_col(real), 0);
}

#[test]
fn test_real_negative_column_reads_seam_band() {
    let store = small_store();
    for row in 0..2 {
        let before_zero = store.real(-1, row).unwrap();
        let last = store.real(7, row).unwrap();
        assert_eq!(before_zero.real_col, last.real_col);
        assert_eq!(before_zero.pixels, last.pixels);
    }
    assert!(store.real(-3, 0).is_none());
    assert!(store.real(8, 0).is_none());
}

#[test]
fn test_wrapped_addressing() {
    let store = small_store();
    assert!(Arc::ptr_eq(
        store.wrapped(10, 1).unwrap(),
        store.get(0, 1).unwrap()
    ));
    assert!(Arc::ptr_eq(
        store.wrapped(-1, 0).unwrap(),
        store.get(9, 0).unwrap()
    ));
    assert!(store.wrapped(3, 2).is_none());
}

#[test]
fn test_rows_are_coded() {
    let store = small_store();
    let tile = store.real(3, 1).unwrap();
    assert_eq!(tile.pixels.get_pixel(0, 0)[1], 1);
    assert_eq!(tile.source_x, 3 * TILE_W);
    assert_eq!(tile.source_y, TILE_H);
}

#[test]
fn test_edge_tiles_are_clamped() {
    let (w, h) = (120, 50);
    let image = tile_coded_image(w, h, TILE_W, TILE_H);
    let geometry = PanoramaGeometry::new(w, h, TILE_W, TILE_H, 32).unwrap();
    let store = build_grid(&image, geometry, &NoOpReporter).unwrap();

    let corner = store.real(7, 1).unwrap();
    assert_eq!((corner.width, corner.height), (8, 18));
    assert_eq!(corner.pixels.dimensions(), (8, 18));

    // The seam band copies the partial column too.
    let seam = store.real(-1, 1).unwrap();
    assert_eq!(seam.pixels.dimensions(), (8, 18));
}

#[test]
fn test_build_grid_rejects_mismatched_image() {
    let image = tile_coded_image(64, HEIGHT, TILE_W, TILE_H);
    let result = build_grid(&image, small_geometry(), &NoOpReporter);
    assert!(matches!(result, Err(PanoError::IncompleteMetadata(_))));
}

#[test]
fn test_flat_index_matches_layout() {
    let store = small_store();
    assert_eq!(store.flat_index(0, 0), 0);
    assert_eq!(store.flat_index(3, 1), 7);
    let (index, _) = store
        .iter()
        .enumerate()
        .find(|(_, t)| t.col == 3 && t.row == 1)
        .unwrap();
    assert_eq!(index, 7);
}
