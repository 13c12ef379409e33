mod common;

use std::path::Path;

use image::RgbaImage;
use panoscope_core::error::PanoError;
use panoscope_core::io::image_io::{load_rgba, save_rgba, tile_file_name};
use panoscope_core::io::{DirectorySource, PanoramaSource};

use common::{small_store, tile_coded_image, HEIGHT, TILE_H, TILE_W, WIDTH};

const CATALOG: &str = r#"
[[panoramas]]
id = 1
name = "Harbour"
manifest = "harbour/manifest.toml"

[[panoramas]]
id = 2
name = "Broken"
manifest = "broken/manifest.toml"
"#;

const HARBOUR: &str = r#"
id = 1
name = "Harbour"
width = 128
height = 64
image = "pano.png"

[[points]]
id = 10
offset_x = 40
offset_y = 20
width = 4
height = 4
image = "lighthouse.png"
description = "Lighthouse"
caption = "Built in 1870"

[[points]]
id = 11
offset_x = 100
offset_y = 30
width = 4
height = 4
image = "missing.png"
description = "Pier"
"#;

const BROKEN: &str = r#"
id = 2
name = "Broken"
width = 0
height = 64
image = "pano.png"
"#;

fn write_fixture(root: &Path) {
    std::fs::write(root.join("catalog.toml"), CATALOG).unwrap();

    let harbour = root.join("harbour");
    std::fs::create_dir_all(&harbour).unwrap();
    std::fs::write(harbour.join("manifest.toml"), HARBOUR).unwrap();
    tile_coded_image(WIDTH, HEIGHT, TILE_W, TILE_H)
        .save(harbour.join("pano.png"))
        .unwrap();
    RgbaImage::from_pixel(4, 4, image::Rgba([200, 10, 10, 255]))
        .save(harbour.join("lighthouse.png"))
        .unwrap();

    let broken = root.join("broken");
    std::fs::create_dir_all(&broken).unwrap();
    std::fs::write(broken.join("manifest.toml"), BROKEN).unwrap();
}

#[test]
fn test_catalog_listing() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let catalog = DirectorySource::new(dir.path()).catalog().unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].id, 1);
    assert_eq!(catalog[0].name, "Harbour");
}

#[test]
fn test_load_panorama() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let asset = DirectorySource::new(dir.path()).load(1).unwrap();
    assert_eq!((asset.width, asset.height), (WIDTH, HEIGHT));
    assert_eq!(asset.image.dimensions(), (WIDTH, HEIGHT));
    assert_eq!(asset.points.len(), 2);

    let lighthouse = &asset.points[0];
    assert_eq!(lighthouse.id, 10);
    assert_eq!(lighthouse.caption, "Built in 1870");
    assert_eq!(lighthouse.image.as_ref().map(|i| i.dimensions()), Some((4, 4)));

    // Unreadable pictures degrade instead of failing the load.
    assert!(asset.points[1].image.is_none());
    assert_eq!(asset.points[1].caption, "");
}

#[test]
fn test_unknown_id_is_invalid_selection() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let result = DirectorySource::new(dir.path()).load(99);
    assert!(matches!(result, Err(PanoError::InvalidSelection { id: 99 })));
}

#[test]
fn test_zero_width_is_incomplete_metadata() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());

    let result = DirectorySource::new(dir.path()).load(2);
    assert!(matches!(result, Err(PanoError::IncompleteMetadata(_))));
}

#[test]
fn test_malformed_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("catalog.toml"), "panoramas = 3").unwrap();

    let result = DirectorySource::new(dir.path()).catalog();
    assert!(matches!(result, Err(PanoError::Manifest(_))));
}

#[test]
fn test_missing_catalog_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = DirectorySource::new(dir.path()).catalog();
    assert!(matches!(result, Err(PanoError::Io(_))));
}

#[test]
fn test_save_and_load_tile() {
    let dir = tempfile::tempdir().unwrap();
    let store = small_store();
    let tile = store.get(0, 1).unwrap();

    let path = dir.path().join(tile_file_name(tile));
    assert!(path.to_string_lossy().ends_with("r001_c000_seam.png"));
    save_rgba(&tile.pixels, &path).unwrap();

    let loaded = load_rgba(&path).unwrap();
    assert_eq!(loaded, tile.pixels);
}
