use image::RgbaImage;

/// Rectangular crop of the panorama, the unit of caching.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Row in the grid.
    pub row: usize,
    /// Column in the extended (seam-band inclusive) grid.
    pub col: usize,
    /// Column of the original image this tile was cut from.
    pub real_col: usize,
    /// Top-left pixel of the crop in the original image.
    pub source_x: u32,
    pub source_y: u32,
    /// Clamped at the right and bottom edges of the image.
    pub width: u32,
    pub height: u32,
    pub pixels: RgbaImage,
    /// Seam-band tiles duplicate a real column.
    pub seam_copy: bool,
}

impl Tile {
    pub fn byte_len(&self) -> usize {
        self.pixels.as_raw().len()
    }
}
