use std::sync::Arc;

use ndarray::Array2;

use super::{PanoramaGeometry, Tile};

/// Read-only backing store of every tile in the extended grid.
///
/// Tiles live in an `Array2` of shape `(extended_cols, rows)`, so the flat
/// position of `(col, row)` is `col * rows + row`. All accessors are
/// bounds-checked and return `None` outside the grid.
#[derive(Clone, Debug)]
pub struct TileStore {
    geometry: PanoramaGeometry,
    tiles: Array2<Arc<Tile>>,
}

impl TileStore {
    /// Wrap tiles laid out column-major (`col * rows + row`).
    ///
    /// Returns `None` when the tile count does not match the geometry.
    pub fn from_columns(geometry: PanoramaGeometry, tiles: Vec<Arc<Tile>>) -> Option<Self> {
        let tiles = Array2::from_shape_vec((geometry.extended_cols(), geometry.rows), tiles).ok()?;
        Some(Self { geometry, tiles })
    }

    pub fn geometry(&self) -> &PanoramaGeometry {
        &self.geometry
    }

    /// Flat position of a cell, matching the viewport's live index.
    pub fn flat_index(&self, col: usize, row: usize) -> usize {
        col * self.geometry.rows + row
    }

    /// Tile at an extended-grid column.
    pub fn get(&self, col: usize, row: usize) -> Option<&Arc<Tile>> {
        self.tiles.get((col, row))
    }

    /// Tile at a real column. Columns in `[-edge_cols, 0)` read the seam band
    /// by plain offsetting, no modulo involved.
    pub fn real(&self, col: i64, row: usize) -> Option<&Arc<Tile>> {
        let extended = col + self.geometry.edge_cols as i64;
        if extended < 0 {
            return None;
        }
        self.get(extended as usize, row)
    }

    /// Tile at an extended column reduced around the loop. This is the one
    /// place the hot path wraps horizontally; rows are not reduced here.
    pub fn wrapped(&self, col: i64, row: usize) -> Option<&Arc<Tile>> {
        let cols = self.geometry.extended_cols() as i64;
        self.get(col.rem_euclid(cols) as usize, row)
    }

    /// Tiles in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tile>> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.tiles.iter().map(|t| t.byte_len()).sum()
    }
}
