pub mod image_io;
pub mod manifest;
pub mod source;

pub use manifest::{CatalogFile, CatalogItem, PanoramaManifest, PointManifest};
pub use source::{CatalogEntry, DirectorySource, PanoramaAsset, PanoramaSource};
