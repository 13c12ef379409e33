use std::time::Duration;

use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::consts::HINT_REACH_FRACTION;
use crate::error::Result;
use crate::grid::{build_grid, PanoramaGeometry, TileStore};
use crate::io::PanoramaAsset;
use crate::orientation::{OrientationIntegrator, OrientationSample, Projection};
use crate::poi::{direction_hints, expand_points, PoiHandle, PointOfInterest};
use crate::scan::{ScanConfirmEngine, ScanPhase};
use crate::view::{VerticalBound, ViewOffsets};
use crate::viewport::{base_cell, ViewportCache, ViewportWindow};

use super::types::{BuildReporter, BuildStage, FrameReport, Overlay, ViewerEvent};

/// One panorama, fully built and ready to be viewed.
///
/// Owns the read-only tile store and all per-session state. A session is
/// only ever constructed complete; switching panoramas drops it whole.
pub struct PanoramaSession {
    id: u32,
    name: String,
    config: ViewerConfig,
    store: TileStore,
    cache: ViewportCache,
    integrator: OrientationIntegrator,
    scan: ScanConfirmEngine,
    points: Vec<PointOfInterest>,
    paused: bool,
    /// Offsets reported while paused.
    frozen: ViewOffsets,
    last_touch: Option<Duration>,
}

impl PanoramaSession {
    pub fn build(
        asset: PanoramaAsset,
        config: &ViewerConfig,
        reporter: &dyn BuildReporter,
    ) -> Result<Self> {
        config.validate()?;
        let geometry = PanoramaGeometry::from_config(asset.width, asset.height, config)?;
        let store = build_grid(&asset.image, geometry, reporter)?;

        reporter.begin_stage(BuildStage::Points, Some(asset.points.len()));
        let points = expand_points(asset.points, &geometry);
        reporter.advance(points.len());
        reporter.finish_stage();

        let integrator = OrientationIntegrator::new(
            Projection::from_geometry(&geometry, config),
            config.orientation.near_zero_band,
        );
        let frozen = integrator.offsets();

        info!(
            id = asset.id,
            name = %asset.name,
            points = points.len(),
            "Panorama session ready"
        );

        Ok(Self {
            id: asset.id,
            name: asset.name,
            config: config.clone(),
            cache: ViewportCache::new(&geometry, &config.display),
            store,
            integrator,
            scan: ScanConfirmEngine::new(&config.scanner),
            points,
            paused: false,
            frozen,
            last_touch: None,
        })
    }

    /// Advance one frame. Orientation is integrated first; the viewport and
    /// the scan rectangle then both work from the frame's offsets.
    pub fn frame(&mut self, sample: OrientationSample, now: Duration) -> FrameReport {
        let live = self.integrator.integrate(sample);
        let offsets = if self.paused {
            self.frozen
        } else {
            self.frozen = live;
            live
        };

        let display = &self.config.display;
        let view = offsets.view_rect(display.width, display.height);
        let geometry = *self.store.geometry();

        let (base_row, base_col) = base_cell(&view, &geometry);
        let window_changed = self.cache.update(&self.store, base_row, base_col);
        let tile_shift = self.cache.sub_tile_offset(&view, &geometry);

        let scan = self.scan.update(&view, &self.points, now);
        let reach = geometry.extended_width() as f64 * HINT_REACH_FRACTION;
        let hints = direction_hints(&view, &self.points, reach);
        let bound = VerticalBound::classify(&view, geometry.height);

        FrameReport {
            offsets,
            view,
            window_changed,
            base_row,
            base_col,
            tile_shift,
            scan,
            hints,
            bound,
            overlay: self.overlay(scan, now),
            paused: self.paused,
        }
    }

    fn overlay(&self, scan: ScanPhase, now: Duration) -> Overlay {
        let recently_touched = self
            .last_touch
            .is_some_and(|t| now.saturating_sub(t) < self.config.controls.reveal());
        let controls_visible = self.paused || recently_touched;
        let show_scan_box = if controls_visible {
            !self.paused
        } else {
            scan.is_scanning()
        };
        Overlay {
            controls_visible,
            show_scan_box,
        }
    }

    /// Apply a user event. `SwitchPanorama` belongs to the viewer and is
    /// ignored here.
    pub fn handle(&mut self, event: ViewerEvent, now: Duration) {
        match event {
            ViewerEvent::Touch => self.last_touch = Some(now),
            ViewerEvent::TogglePause => {
                self.last_touch = Some(now);
                self.paused = !self.paused;
                debug!(paused = self.paused, "Pause toggled");
            }
            ViewerEvent::BeginCalibration => {
                self.last_touch = Some(now);
                self.integrator.begin_calibration();
            }
            ViewerEvent::EndCalibration => self.integrator.end_calibration(),
            ViewerEvent::SwitchPanorama => {}
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &PanoramaGeometry {
        self.store.geometry()
    }

    pub fn store(&self) -> &TileStore {
        &self.store
    }

    pub fn window(&self) -> &ViewportWindow {
        self.cache.window()
    }

    pub fn cache(&self) -> &ViewportCache {
        &self.cache
    }

    pub fn integrator(&self) -> &OrientationIntegrator {
        &self.integrator
    }

    pub fn scan(&self) -> &ScanConfirmEngine {
        &self.scan
    }

    pub fn points(&self) -> &[PointOfInterest] {
        &self.points
    }

    pub fn point(&self, handle: PoiHandle) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.handle == handle)
    }

    /// Point whose detail panel should be shown, if one is confirmed.
    pub fn confirmed_point(&self) -> Option<&PointOfInterest> {
        self.scan.confirmed().and_then(|h| self.point(h))
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
