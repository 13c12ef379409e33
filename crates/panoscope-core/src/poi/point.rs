use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::consts::{CAPTION_HARD_LIMIT, CAPTION_SOFT_LIMIT};
use crate::grid::PanoramaGeometry;

use super::caption::wrap_text;

/// Position of a point in the session's point list. Seam duplicates share a
/// source id but never a handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoiHandle(pub usize);

impl std::fmt::Display for PoiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Point-of-interest record as delivered by a panorama source, anchored in
/// original image pixels.
#[derive(Clone, Debug, Default)]
pub struct PoiRecord {
    pub id: u32,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Size of the attached picture; zero means there is none.
    pub width: u32,
    pub height: u32,
    pub image: Option<RgbaImage>,
    pub description: String,
    pub caption: String,
}

/// Which copy of a source point a record is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeamCopy {
    #[default]
    Primary,
    /// Second record for a point that also appears in the seam band.
    SeamDuplicate,
}

/// A point of interest anchored in extended panorama pixels.
#[derive(Clone, Debug)]
pub struct PointOfInterest {
    pub handle: PoiHandle,
    /// Source id, shared by seam duplicates.
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub has_image: bool,
    pub image: Option<Arc<RgbaImage>>,
    pub description: Vec<String>,
    /// Empty when the point has no picture to caption.
    pub caption: Vec<String>,
    pub copy: SeamCopy,
}

impl PointOfInterest {
    pub fn anchor(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Turn source records into session points.
///
/// Anchors move into extended space by the seam band width. A point landing
/// in the last seam-band-width pixels of the original image is also visible
/// in the seam band, so it gets an independent second record shifted back by
/// the original width.
pub fn expand_points(records: Vec<PoiRecord>, geometry: &PanoramaGeometry) -> Vec<PointOfInterest> {
    let band = geometry.seam_band_width() as f64;
    let width = geometry.width as f64;
    let mut points = Vec::with_capacity(records.len());

    for record in records {
        let image = record
            .image
            .filter(|img| img.width() > 0 && img.height() > 0)
            .map(Arc::new);
        let has_image = record.width > 0 && record.height > 0 && image.is_some();
        if record.width > 0 && !has_image {
            warn!(
                id = record.id,
                "Point reports a picture but none could be decoded; showing description only"
            );
        }

        let description = wrap_text(&record.description, CAPTION_SOFT_LIMIT, CAPTION_HARD_LIMIT);
        let caption = if has_image {
            wrap_text(&record.caption, CAPTION_SOFT_LIMIT, CAPTION_HARD_LIMIT)
        } else {
            Vec::new()
        };

        let primary = PointOfInterest {
            handle: PoiHandle(points.len()),
            id: record.id,
            x: record.offset_x as f64 + band,
            y: record.offset_y as f64,
            width: record.width,
            height: record.height,
            has_image,
            image: if has_image { image } else { None },
            description,
            caption,
            copy: SeamCopy::Primary,
        };

        if primary.x >= width {
            let duplicate = PointOfInterest {
                handle: PoiHandle(points.len() + 1),
                x: primary.x - width,
                copy: SeamCopy::SeamDuplicate,
                ..primary.clone()
            };
            debug!(id = record.id, x = duplicate.x, "Duplicated point into seam band");
            points.push(primary);
            points.push(duplicate);
        } else {
            points.push(primary);
        }
    }

    points
}
