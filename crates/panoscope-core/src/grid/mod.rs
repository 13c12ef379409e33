pub mod build;
pub mod store;
pub mod tile;

pub use build::build_grid;
pub use store::TileStore;
pub use tile::Tile;

use tracing::warn;

use crate::config::ViewerConfig;
use crate::error::{PanoError, Result};

/// Static geometry of a panorama cut into tiles.
///
/// "Real" columns cover the original image. The grid is extended by
/// `edge_cols` seam-band columns placed before real column 0; they duplicate
/// the last `edge_cols` real columns, so a window up to the seam band's width
/// never straddles the image boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanoramaGeometry {
    /// Width of the original image in pixels.
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub rows: usize,
    /// Real columns (without the seam band).
    pub cols: usize,
    pub edge_cols: usize,
}

impl PanoramaGeometry {
    pub fn new(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        seam_band: u32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PanoError::InvalidDimensions { width, height });
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(PanoError::InvalidConfig(format!(
                "tile size must be non-zero, got {tile_width}x{tile_height}"
            )));
        }

        let rows = height.div_ceil(tile_height) as usize;
        let cols = width.div_ceil(tile_width) as usize;
        let edge_cols = seam_band.div_ceil(tile_width) as usize;

        if edge_cols > cols {
            return Err(PanoError::InvalidDimensions { width, height });
        }
        if width % tile_width != 0 {
            warn!(
                width,
                tile_width, "Panorama width is not a multiple of the tile width; the seam will show a gap"
            );
        }

        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            rows,
            cols,
            edge_cols,
        })
    }

    pub fn from_config(width: u32, height: u32, config: &ViewerConfig) -> Result<Self> {
        Self::new(
            width,
            height,
            config.tiles.width,
            config.tiles.height,
            config.seam_band_width(),
        )
    }

    /// Columns including the seam band.
    pub fn extended_cols(&self) -> usize {
        self.cols + self.edge_cols
    }

    /// Pixel width of the seam band (whole tiles).
    pub fn seam_band_width(&self) -> u32 {
        self.edge_cols as u32 * self.tile_width
    }

    /// Width of the panorama including the seam band.
    pub fn extended_width(&self) -> u32 {
        self.width + self.seam_band_width()
    }

    /// Lowest row the window's top may start on. There is no vertical wraparound.
    pub fn lowest_row(&self) -> usize {
        ((self.height / self.tile_height) as usize).min(self.rows - 1)
    }

    /// Real column that extended column `col` shows.
    pub fn real_column(&self, col: usize) -> usize {
        if col < self.edge_cols {
            self.cols - self.edge_cols + col
        } else {
            col - self.edge_cols
        }
    }

    pub fn tile_count(&self) -> usize {
        self.extended_cols() * self.rows
    }
}
