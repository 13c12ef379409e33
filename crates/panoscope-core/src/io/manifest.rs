use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Contents of `catalog.toml` at the root of a panorama directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub panoramas: Vec<CatalogItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u32,
    pub name: String,
    /// Manifest path, relative to the catalog directory.
    pub manifest: PathBuf,
}

/// One panorama: its image, its pixel size and its points of interest.
///
/// Relative paths resolve against the directory holding the manifest.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanoramaManifest {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub image: PathBuf,
    #[serde(default)]
    pub points: Vec<PointManifest>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointManifest {
    pub id: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub caption: String,
}
