use std::sync::Arc;

use ndarray::Array2;
use tracing::debug;

use crate::config::DisplayConfig;
use crate::consts::WINDOW_SLACK_TILES;
use crate::grid::{PanoramaGeometry, Tile, TileStore};
use crate::view::ViewRect;

/// Grid cell shown in the window's top-left slot for a given screen.
///
/// The column follows the screen's left edge around the loop; the row is
/// clamped to `[0, lowest_row]` since the panorama does not wrap vertically.
pub fn base_cell(view: &ViewRect, geometry: &PanoramaGeometry) -> (usize, usize) {
    let col = (view.left / geometry.tile_width as f64).floor() as i64;
    let col = col.rem_euclid(geometry.extended_cols() as i64) as usize;

    let row = (view.top / geometry.tile_height as f64).floor();
    let row = if row.is_finite() && row > 0.0 {
        (row as usize).min(geometry.lowest_row())
    } else {
        0
    };

    (row, col)
}

/// Tiles currently resident for display.
///
/// Slot `(c, r)` holds the tile for grid cell
/// `((base_col + c) mod extended_cols, (base_row + r) mod rows)`.
#[derive(Clone, Debug)]
pub struct ViewportWindow {
    slots: Array2<Option<Arc<Tile>>>,
    base_row: usize,
    base_col: usize,
    live_index: Option<usize>,
}

impl ViewportWindow {
    fn new(used_cols: usize, used_rows: usize) -> Self {
        Self {
            slots: Array2::from_elem((used_cols, used_rows), None),
            base_row: 0,
            base_col: 0,
            live_index: None,
        }
    }

    pub fn used_cols(&self) -> usize {
        self.slots.nrows()
    }

    pub fn used_rows(&self) -> usize {
        self.slots.ncols()
    }

    pub fn base_row(&self) -> usize {
        self.base_row
    }

    pub fn base_col(&self) -> usize {
        self.base_col
    }

    /// `base_col * rows + base_row`, or `None` before the first update.
    pub fn live_index(&self) -> Option<usize> {
        self.live_index
    }

    pub fn slot(&self, col: usize, row: usize) -> Option<&Arc<Tile>> {
        self.slots.get((col, row)).and_then(Option::as_ref)
    }

    /// Filled slots with their `(col, row)` position in the window.
    pub fn slots(&self) -> impl Iterator<Item = ((usize, usize), &Arc<Tile>)> {
        self.slots
            .indexed_iter()
            .filter_map(|(pos, slot)| slot.as_ref().map(|tile| (pos, tile)))
    }
}

/// Counters describing how the window has been maintained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Updates that refilled every slot.
    pub fills: usize,
    /// Updates that shifted retained columns.
    pub shifts: usize,
    pub tiles_fetched: usize,
    pub tiles_reused: usize,
}

/// Keeps the viewport window in sync with the screen position, reusing
/// resident tiles when the window slides sideways.
#[derive(Clone, Debug)]
pub struct ViewportCache {
    grid_rows: usize,
    window: ViewportWindow,
    stats: CacheStats,
}

impl ViewportCache {
    pub fn new(geometry: &PanoramaGeometry, display: &DisplayConfig) -> Self {
        let used_cols = (display.width / geometry.tile_width) as usize + WINDOW_SLACK_TILES;
        let used_rows = (display.height / geometry.tile_height) as usize + WINDOW_SLACK_TILES;
        Self::with_window(
            geometry,
            used_cols.min(geometry.extended_cols()),
            used_rows.min(geometry.rows),
        )
    }

    /// Cache with an explicit window size, clamped to the grid.
    pub fn with_window(geometry: &PanoramaGeometry, used_cols: usize, used_rows: usize) -> Self {
        let used_cols = used_cols.clamp(1, geometry.extended_cols());
        let used_rows = used_rows.clamp(1, geometry.rows);
        Self {
            grid_rows: geometry.rows,
            window: ViewportWindow::new(used_cols, used_rows),
            stats: CacheStats::default(),
        }
    }

    pub fn window(&self) -> &ViewportWindow {
        &self.window
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Move the window so its top-left slot shows `(base_row, base_col)`.
    ///
    /// Returns `true` when the window contents changed. A sideways move
    /// smaller than the window keeps the overlapping columns and fetches only
    /// the newly exposed ones; any row change refills every slot.
    pub fn update(&mut self, store: &TileStore, base_row: usize, base_col: usize) -> bool {
        let new_index = base_col * self.grid_rows + base_row;
        if self.window.live_index == Some(new_index) {
            return false;
        }

        let used_cols = self.window.used_cols();
        let used_rows = self.window.used_rows();
        let mut refill = 0..used_cols;

        if self.window.live_index.is_some() {
            let row_shift = base_row as i64 - self.window.base_row as i64;
            let col_shift = base_col as i64 - self.window.base_col as i64;

            if row_shift == 0 && col_shift.unsigned_abs() < used_cols as u64 {
                let k = col_shift.unsigned_abs() as usize;
                if col_shift > 0 {
                    // Panning right: columns slide toward slot 0, lowest first.
                    for c in 0..used_cols - k {
                        for r in 0..used_rows {
                            let tile = self.window.slots[[c + k, r]].clone();
                            self.window.slots[[c, r]] = tile;
                        }
                    }
                    refill = used_cols - k..used_cols;
                } else {
                    // Panning left: columns slide away from slot 0, highest first.
                    for c in (k..used_cols).rev() {
                        for r in 0..used_rows {
                            let tile = self.window.slots[[c - k, r]].clone();
                            self.window.slots[[c, r]] = tile;
                        }
                    }
                    refill = 0..k;
                }
                self.stats.shifts += 1;
                self.stats.tiles_reused += (used_cols - k) * used_rows;
                debug!(col_shift, base_col, "Viewport shifted");
            } else {
                self.stats.fills += 1;
                debug!(row_shift, col_shift, "Viewport refilled");
            }
        } else {
            self.stats.fills += 1;
        }

        for c in refill {
            for r in 0..used_rows {
                let row = (base_row + r) % self.grid_rows;
                self.window.slots[[c, r]] = store.wrapped((base_col + c) as i64, row).cloned();
                self.stats.tiles_fetched += 1;
            }
        }

        self.window.base_row = base_row;
        self.window.base_col = base_col;
        self.window.live_index = Some(new_index);
        true
    }

    /// Pixel distance from the top-left slot's origin to the screen's corner.
    pub fn sub_tile_offset(&self, view: &ViewRect, geometry: &PanoramaGeometry) -> (f64, f64) {
        let x = view.left - (self.window.base_col as f64 * geometry.tile_width as f64);
        let y = view.top - (self.window.base_row as f64 * geometry.tile_height as f64);
        (x, y)
    }
}
