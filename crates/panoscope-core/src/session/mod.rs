pub mod panorama;
pub mod types;
pub mod viewer;

pub use panorama::PanoramaSession;
pub use types::{BuildReporter, BuildStage, FrameReport, NoOpReporter, Overlay, ViewerEvent};
pub use viewer::{Viewer, ViewerState};
