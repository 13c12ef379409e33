use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{imageops, RgbaImage};
use rayon::prelude::*;
use tracing::info;

use crate::error::{PanoError, Result};
use crate::session::types::{BuildReporter, BuildStage};

use super::{PanoramaGeometry, Tile, TileStore};

/// Cut one real-grid cell out of the panorama, clamping at the image edges.
fn crop_tile(image: &RgbaImage, geometry: &PanoramaGeometry, col: usize, row: usize) -> Tile {
    let source_x = geometry.tile_width * col as u32;
    let source_y = geometry.tile_height * row as u32;
    let width = geometry.tile_width.min(geometry.width - source_x);
    let height = geometry.tile_height.min(geometry.height - source_y);

    let pixels = imageops::crop_imm(image, source_x, source_y, width, height).to_image();

    Tile {
        row,
        col: col + geometry.edge_cols,
        real_col: col,
        source_x,
        source_y,
        width,
        height,
        pixels,
        seam_copy: false,
    }
}

/// Split a decoded panorama into the extended tile grid.
///
/// Real columns are sliced in parallel. The seam band is then prepended as
/// copies of the last `edge_cols` real columns, so extended column 0 sits
/// immediately to the left of real column 0 around the loop.
pub fn build_grid(
    image: &RgbaImage,
    geometry: PanoramaGeometry,
    reporter: &dyn BuildReporter,
) -> Result<TileStore> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(PanoError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    if (w, h) != (geometry.width, geometry.height) {
        return Err(PanoError::IncompleteMetadata(format!(
            "panorama reported as {}x{} but decoded as {w}x{h}",
            geometry.width, geometry.height
        )));
    }

    info!(
        width = geometry.width,
        height = geometry.height,
        rows = geometry.rows,
        cols = geometry.cols,
        edge_cols = geometry.edge_cols,
        "Slicing panorama into tiles"
    );

    reporter.begin_stage(BuildStage::Slicing, Some(geometry.cols));
    let done = AtomicUsize::new(0);
    let real_columns: Vec<Vec<Arc<Tile>>> = (0..geometry.cols)
        .into_par_iter()
        .map(|col| {
            let column = (0..geometry.rows)
                .map(|row| Arc::new(crop_tile(image, &geometry, col, row)))
                .collect();
            reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
            column
        })
        .collect();
    reporter.finish_stage();

    reporter.begin_stage(BuildStage::SeamBand, Some(geometry.edge_cols));
    let mut tiles = Vec::with_capacity(geometry.tile_count());
    for edge in 0..geometry.edge_cols {
        let source = &real_columns[geometry.real_column(edge)];
        tiles.extend(source.iter().map(|tile| {
            Arc::new(Tile {
                col: edge,
                seam_copy: true,
                ..Tile::clone(tile)
            })
        }));
        reporter.advance(edge + 1);
    }
    reporter.finish_stage();

    for column in real_columns {
        tiles.extend(column);
    }

    let store = TileStore::from_columns(geometry, tiles).ok_or_else(|| {
        PanoError::IncompleteMetadata("tile count does not match grid geometry".into())
    })?;

    info!(
        tiles = store.len(),
        megabytes = store.byte_len() as f64 / (1024.0 * 1024.0),
        "Tile grid ready"
    );
    Ok(store)
}
