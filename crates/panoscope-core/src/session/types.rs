use crate::poi::DirectionHints;
use crate::scan::ScanPhase;
use crate::view::{VerticalBound, ViewOffsets, ViewRect};

/// Panorama build stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStage {
    Loading,
    Slicing,
    SeamBand,
    Points,
}

impl std::fmt::Display for BuildStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading panorama"),
            Self::Slicing => write!(f, "Slicing tiles"),
            Self::SeamBand => write!(f, "Duplicating seam band"),
            Self::Points => write!(f, "Placing points"),
        }
    }
}

/// Thread-safe progress reporting while a panorama is built.
///
/// Tile slicing runs on the rayon pool, so implementors must tolerate calls
/// from several threads. All methods default to no-ops.
pub trait BuildReporter: Send + Sync {
    /// A stage has started. `total_items` is its work item count, if known.
    fn begin_stage(&self, _stage: BuildStage, _total_items: Option<usize>) {}

    /// `items_done` work items of the current stage are complete.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// Reporter that ignores every update.
pub struct NoOpReporter;
impl BuildReporter for NoOpReporter {}

/// Discrete user input, already routed from touch regions by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Any touch on the viewer; reveals the on-screen controls.
    Touch,
    TogglePause,
    BeginCalibration,
    EndCalibration,
    /// Leave the current panorama and return to selection.
    SwitchPanorama,
}

/// On-screen chrome derived from touches, pause and scan state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overlay {
    pub controls_visible: bool,
    pub show_scan_box: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub offsets: ViewOffsets,
    pub view: ViewRect,
    pub window_changed: bool,
    pub base_row: usize,
    pub base_col: usize,
    /// Pixel offset of the screen corner inside the window's top-left tile.
    pub tile_shift: (f64, f64),
    pub scan: ScanPhase,
    pub hints: DirectionHints,
    pub bound: VerticalBound,
    pub overlay: Overlay,
    pub paused: bool,
}
