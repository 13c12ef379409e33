use std::time::Duration;

use tracing::debug;

use crate::config::ScannerConfig;
use crate::poi::{PoiHandle, PointOfInterest};
use crate::view::ViewRect;

/// Observable state of the scan rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScanPhase {
    /// No point is inside the rectangle.
    #[default]
    Idle,
    /// A point is inside and its dwell timer is running.
    Scanning { handle: PoiHandle, elapsed: Duration },
    /// The point has dwelt long enough to be selected.
    Confirmed { handle: PoiHandle },
}

impl ScanPhase {
    pub fn handle(&self) -> Option<PoiHandle> {
        match self {
            Self::Idle => None,
            Self::Scanning { handle, .. } | Self::Confirmed { handle } => Some(*handle),
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, Self::Scanning { .. })
    }
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Scanning { handle, elapsed } => {
                write!(f, "Scanning {handle} ({:.2}s)", elapsed.as_secs_f64())
            }
            Self::Confirmed { handle } => write!(f, "Confirmed {handle}"),
        }
    }
}

#[derive(Clone, Debug, Default)]
struct ScanState {
    scanned: Option<PoiHandle>,
    confirmed: Option<PoiHandle>,
    dwell_start: Option<Duration>,
    closest_sq: f64,
}

/// Hit-tests points of interest against a rectangle centered on the screen
/// and confirms the nearest one after it dwells long enough.
#[derive(Clone, Debug)]
pub struct ScanConfirmEngine {
    rect_width: f64,
    rect_height: f64,
    threshold: Duration,
    state: ScanState,
    phase: ScanPhase,
}

impl ScanConfirmEngine {
    pub fn new(config: &ScannerConfig) -> Self {
        Self::with_rect(config.width as f64, config.height as f64, config.dwell())
    }

    pub fn with_rect(rect_width: f64, rect_height: f64, threshold: Duration) -> Self {
        Self {
            rect_width,
            rect_height,
            threshold,
            state: ScanState::default(),
            phase: ScanPhase::Idle,
        }
    }

    /// Run one frame of hit-testing. `now` is time since the session started.
    ///
    /// The scanned point is dropped the moment it leaves the rectangle. Among
    /// points inside the rectangle the one closest to the screen center wins;
    /// a challenger must be strictly closer, so exact ties keep the point
    /// that claimed the rectangle first. Every change of point restarts the
    /// dwell timer.
    pub fn update(&mut self, view: &ViewRect, points: &[PointOfInterest], now: Duration) -> ScanPhase {
        let scan_rect = view.centered(self.rect_width, self.rect_height);
        let (cx, cy) = view.center();
        let dist_sq = |p: &PointOfInterest| (p.x - cx).powi(2) + (p.y - cy).powi(2);

        if let Some(handle) = self.state.scanned {
            match points.iter().find(|p| p.handle == handle) {
                Some(p) if scan_rect.contains(p.x, p.y) => self.state.closest_sq = dist_sq(p),
                _ => {
                    debug!(%handle, "Point left the scan rectangle");
                    self.reset();
                }
            }
        }

        for point in points {
            if !view.shows(point.x, point.y) || !scan_rect.contains(point.x, point.y) {
                continue;
            }
            let d = dist_sq(point);
            let claim = match self.state.scanned {
                None => true,
                Some(handle) => handle != point.handle && d < self.state.closest_sq,
            };
            if claim {
                debug!(handle = %point.handle, id = point.id, "Scanning point");
                self.state.scanned = Some(point.handle);
                self.state.confirmed = None;
                self.state.closest_sq = d;
                self.state.dwell_start = Some(now);
            }
        }

        self.phase = match (self.state.scanned, self.state.dwell_start) {
            (Some(handle), Some(start)) => {
                let elapsed = now.saturating_sub(start);
                if elapsed >= self.threshold {
                    if self.state.confirmed != Some(handle) {
                        debug!(%handle, "Point confirmed");
                    }
                    self.state.confirmed = Some(handle);
                    ScanPhase::Confirmed { handle }
                } else {
                    ScanPhase::Scanning { handle, elapsed }
                }
            }
            _ => ScanPhase::Idle,
        };
        self.phase
    }

    /// Phase computed by the last update.
    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn scanned(&self) -> Option<PoiHandle> {
        self.state.scanned
    }

    pub fn confirmed(&self) -> Option<PoiHandle> {
        self.state.confirmed
    }

    /// Squared distance of the scanned point from the screen center.
    pub fn closest_squared_distance(&self) -> Option<f64> {
        self.state.scanned.map(|_| self.state.closest_sq)
    }

    pub fn reset(&mut self) {
        self.state = ScanState::default();
        self.phase = ScanPhase::Idle;
    }
}
