use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::error::{PanoError, Result};
use crate::poi::PoiRecord;

use super::image_io::load_rgba;
use super::manifest::{CatalogFile, PanoramaManifest, PointManifest};

/// Catalog entry offered for selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
}

/// A decoded panorama with its metadata, ready to be sliced.
#[derive(Clone, Debug)]
pub struct PanoramaAsset {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub image: RgbaImage,
    pub points: Vec<PoiRecord>,
}

/// Where panoramas come from.
pub trait PanoramaSource {
    fn catalog(&self) -> Result<Vec<CatalogEntry>>;

    /// Fetch and decode one panorama. Ids missing from the catalog are
    /// reported as `InvalidSelection`.
    fn load(&self, id: u32) -> Result<PanoramaAsset>;
}

/// Panoramas described by a `catalog.toml` and per-panorama manifests on disk.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub const CATALOG_FILE: &'static str = "catalog.toml";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_catalog(&self) -> Result<CatalogFile> {
        let path = self.root.join(Self::CATALOG_FILE);
        let text = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Read and check a manifest without decoding any image.
    pub fn manifest(&self, id: u32) -> Result<(PanoramaManifest, PathBuf)> {
        let catalog = self.read_catalog()?;
        let item = catalog
            .panoramas
            .iter()
            .find(|p| p.id == id)
            .ok_or(PanoError::InvalidSelection { id })?;

        let path = self.root.join(&item.manifest);
        let text = std::fs::read_to_string(&path)?;
        let manifest: PanoramaManifest = toml::from_str(&text)?;

        if manifest.id != id {
            warn!(
                catalog_id = id,
                manifest_id = manifest.id,
                "Manifest id differs from catalog id"
            );
        }
        if manifest.width == 0 || manifest.height == 0 {
            return Err(PanoError::IncompleteMetadata(format!(
                "panorama {id} has no pixel size"
            )));
        }

        let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok((manifest, base))
    }
}

impl PanoramaSource for DirectorySource {
    fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        let catalog = self.read_catalog()?;
        Ok(catalog
            .panoramas
            .into_iter()
            .map(|p| CatalogEntry {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    fn load(&self, id: u32) -> Result<PanoramaAsset> {
        let (manifest, base) = self.manifest(id)?;
        let image_path = base.join(&manifest.image);
        info!(id, path = %image_path.display(), "Decoding panorama");
        let image = load_rgba(&image_path)?;

        let points = manifest
            .points
            .into_iter()
            .map(|p| point_record(p, &base))
            .collect();

        Ok(PanoramaAsset {
            id,
            name: manifest.name,
            width: manifest.width,
            height: manifest.height,
            image,
            points,
        })
    }
}

/// Point pictures that fail to decode degrade to a description-only point.
fn point_record(point: PointManifest, base: &Path) -> PoiRecord {
    let image = match (&point.image, point.width > 0) {
        (Some(rel), true) => {
            let path = base.join(rel);
            match load_rgba(&path) {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!(id = point.id, path = %path.display(), "Point picture unreadable: {e}");
                    None
                }
            }
        }
        _ => {
            debug!(id = point.id, "Point has no picture");
            None
        }
    };

    PoiRecord {
        id: point.id,
        offset_x: point.offset_x,
        offset_y: point.offset_y,
        width: point.width,
        height: point.height,
        image,
        description: point.description,
        caption: point.caption,
    }
}
