use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::Result;
use crate::grid::Tile;

/// Decode any supported image file into 8-bit RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

/// Save an RGBA image, choosing the format from the file extension.
///
/// Unknown or missing extensions fall back to PNG.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => ImageFormat::Tiff,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel.
        let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
        rgb.save_with_format(path, format)?;
    } else {
        image.save_with_format(path, format)?;
    }
    Ok(())
}

/// File name for an exported tile: `r{row}_c{col}.png`, with seam copies
/// marked so they sort next to the real columns.
pub fn tile_file_name(tile: &Tile) -> String {
    if tile.seam_copy {
        format!("r{:03}_c{:03}_seam.png", tile.row, tile.col)
    } else {
        format!("r{:03}_c{:03}.png", tile.row, tile.col)
    }
}
