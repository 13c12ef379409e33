pub mod caption;
pub mod hints;
pub mod point;

pub use caption::wrap_text;
pub use hints::{direction_hints, DirectionHints};
pub use point::{expand_points, PoiHandle, PoiRecord, PointOfInterest, SeamCopy};
