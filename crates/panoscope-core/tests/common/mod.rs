#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use panoscope_core::config::{DisplayConfig, ScannerConfig, TileConfig, ViewerConfig};
use panoscope_core::grid::{build_grid, PanoramaGeometry, TileStore};
use panoscope_core::io::PanoramaAsset;
use panoscope_core::poi::{PoiHandle, PoiRecord, PointOfInterest, SeamCopy};
use panoscope_core::session::NoOpReporter;

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;
pub const TILE_W: u32 = 16;
pub const TILE_H: u32 = 32;

/// Image whose red channel is the tile column and green channel the tile row.
pub fn tile_coded_image(width: u32, height: u32, tile_w: u32, tile_h: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x / tile_w) as u8, (y / tile_h) as u8, 0, 255])
    })
}

/// 32x24 display over 16x32 tiles with a two-column seam band.
pub fn small_config() -> ViewerConfig {
    ViewerConfig {
        display: DisplayConfig {
            width: 32,
            height: 24,
        },
        tiles: TileConfig {
            width: TILE_W,
            height: TILE_H,
            seam_band: Some(32),
        },
        scanner: ScannerConfig {
            width: 10,
            height: 10,
            dwell_secs: 1.0,
        },
        ..Default::default()
    }
}

/// 8 real columns, 2 rows, 2 seam columns.
pub fn small_geometry() -> PanoramaGeometry {
    PanoramaGeometry::new(WIDTH, HEIGHT, TILE_W, TILE_H, 32).unwrap()
}

pub fn small_store() -> TileStore {
    let image = tile_coded_image(WIDTH, HEIGHT, TILE_W, TILE_H);
    build_grid(&image, small_geometry(), &NoOpReporter).unwrap()
}

pub fn record(id: u32, offset_x: i32, offset_y: i32) -> PoiRecord {
    PoiRecord {
        id,
        offset_x,
        offset_y,
        description: format!("Point {id}"),
        ..Default::default()
    }
}

pub fn asset(id: u32, points: Vec<PoiRecord>) -> PanoramaAsset {
    PanoramaAsset {
        id,
        name: format!("Panorama {id}"),
        width: WIDTH,
        height: HEIGHT,
        image: tile_coded_image(WIDTH, HEIGHT, TILE_W, TILE_H),
        points,
    }
}

/// Bare point at an extended-space anchor.
pub fn point(handle: usize, x: f64, y: f64) -> PointOfInterest {
    PointOfInterest {
        handle: PoiHandle(handle),
        id: handle as u32,
        x,
        y,
        width: 0,
        height: 0,
        has_image: false,
        image: None,
        description: Vec::new(),
        caption: Vec::new(),
        copy: SeamCopy::Primary,
    }
}
