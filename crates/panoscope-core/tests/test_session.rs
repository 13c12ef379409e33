mod common;

use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use panoscope_core::error::{PanoError, Result};
use panoscope_core::io::{CatalogEntry, PanoramaAsset, PanoramaSource};
use panoscope_core::orientation::OrientationSample;
use panoscope_core::scan::ScanPhase;
use panoscope_core::session::{NoOpReporter, PanoramaSession, Viewer, ViewerEvent, ViewerState};
use panoscope_core::view::VerticalBound;

use common::{asset, record, small_config, WIDTH};

/// In-memory panoramas; id 3 is listed but fails to load.
struct MemorySource {
    assets: Vec<PanoramaAsset>,
}

impl MemorySource {
    fn new() -> Self {
        // Centered under the default view (see `upright`).
        Self {
            assets: vec![asset(1, vec![record(5, 112, 32)]), asset(2, Vec::new())],
        }
    }
}

impl PanoramaSource for MemorySource {
    fn catalog(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries: Vec<_> = self
            .assets
            .iter()
            .map(|a| CatalogEntry {
                id: a.id,
                name: a.name.clone(),
            })
            .collect();
        entries.push(CatalogEntry {
            id: 3,
            name: "Unreachable".into(),
        });
        Ok(entries)
    }

    fn load(&self, id: u32) -> Result<PanoramaAsset> {
        self.assets
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| PanoError::IncompleteMetadata(format!("no data for {id}")))
    }
}

/// Upright device facing yaw 0. With the small config the screen covers
/// x in [128, 160) and y in [20, 44), centered on (144, 32).
fn upright(yaw: f64) -> OrientationSample {
    OrientationSample::new(0.0, -FRAC_PI_2, yaw)
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn ready_viewer() -> Viewer {
    let mut viewer = Viewer::new(small_config()).unwrap();
    viewer.select(&MemorySource::new(), 1, &NoOpReporter).unwrap();
    viewer
}

// ---------------------------------------------------------------------------
// Viewer lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_frames_refused_until_ready() {
    let mut viewer = Viewer::new(small_config()).unwrap();
    assert!(matches!(viewer.state(), ViewerState::Idle));
    assert!(matches!(
        viewer.frame(upright(0.0), secs(0.0)),
        Err(PanoError::NotReady)
    ));
    assert!(matches!(
        viewer.handle(ViewerEvent::Touch, secs(0.0)),
        Err(PanoError::NotReady)
    ));
}

#[test]
fn test_invalid_selection_keeps_state() {
    let mut viewer = Viewer::new(small_config()).unwrap();
    let result = viewer.select(&MemorySource::new(), 42, &NoOpReporter);
    assert!(matches!(result, Err(PanoError::InvalidSelection { id: 42 })));
    assert!(matches!(viewer.state(), ViewerState::Idle));
    assert_eq!(viewer.catalog().len(), 3);

    let mut viewer = ready_viewer();
    assert!(viewer.select(&MemorySource::new(), 42, &NoOpReporter).is_err());
    assert!(viewer.is_ready());
    assert_eq!(viewer.session().unwrap().id(), 1);
}

#[test]
fn test_select_builds_session() {
    let viewer = ready_viewer();
    assert!(viewer.is_ready());
    let session = viewer.session().unwrap();
    assert_eq!(session.name(), "Panorama 1");
    assert_eq!(session.geometry().extended_cols(), 10);
    // The point sits in the last seam-band-width pixels, so it is duplicated.
    assert_eq!(session.points().len(), 2);
}

#[test]
fn test_failed_load_tears_down() {
    let mut viewer = ready_viewer();
    let result = viewer.select(&MemorySource::new(), 3, &NoOpReporter);
    assert!(matches!(result, Err(PanoError::IncompleteMetadata(_))));
    assert!(matches!(viewer.state(), ViewerState::TornDown));
    assert!(viewer.session().is_none());
}

#[test]
fn test_switch_panorama_tears_down() {
    let mut viewer = ready_viewer();
    viewer.frame(upright(0.0), secs(0.0)).unwrap();
    viewer.handle(ViewerEvent::SwitchPanorama, secs(0.1)).unwrap();

    assert!(matches!(viewer.state(), ViewerState::TornDown));
    assert!(matches!(
        viewer.frame(upright(0.0), secs(0.2)),
        Err(PanoError::NotReady)
    ));

    viewer.select(&MemorySource::new(), 2, &NoOpReporter).unwrap();
    assert_eq!(viewer.session().unwrap().id(), 2);
}

#[test]
fn test_build_rejects_mismatched_image() {
    let mut bad = asset(1, Vec::new());
    bad.width = 256;
    let result = PanoramaSession::build(bad, &small_config(), &NoOpReporter);
    assert!(matches!(result, Err(PanoError::IncompleteMetadata(_))));
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

#[test]
fn test_first_frame_fills_window() {
    let mut viewer = ready_viewer();
    let report = viewer.frame(upright(0.0), secs(0.0)).unwrap();

    assert_eq!(report.offsets.horizontal, -128.0);
    assert_eq!(report.offsets.vertical, -20.0);
    assert!(report.window_changed);
    assert_eq!((report.base_row, report.base_col), (0, 8));
    assert_eq!(report.tile_shift, (0.0, 20.0));
    assert_eq!(report.bound, VerticalBound::Within);

    let session = viewer.session().unwrap();
    assert_eq!(session.window().slots().count(), 8);
    assert_eq!(session.cache().stats().fills, 1);
}

/// Real-image x of the screen's left edge, read back from the window.
fn real_left_edge(viewer: &Viewer, tile_shift: (f64, f64)) -> f64 {
    let session = viewer.session().unwrap();
    let tile = session.window().slot(0, 0).unwrap();
    let tile_width = session.geometry().tile_width as f64;
    tile.real_col as f64 * tile_width + tile_shift.0
}

#[test]
fn test_view_is_continuous_across_the_wrap() {
    // Display narrower than a whole number of tiles, and a seam band wider
    // than the display.
    let mut uneven_display = small_config();
    uneven_display.display.width = 30;
    uneven_display.tiles.seam_band = None;
    let mut wide_band = small_config();
    wide_band.tiles.seam_band = Some(64);

    for config in [uneven_display, wide_band] {
        let label = format!(
            "display {} seam band {}",
            config.display.width,
            config.seam_band_width()
        );
        let mut viewer = Viewer::new(config).unwrap();
        viewer.select(&MemorySource::new(), 2, &NoOpReporter).unwrap();

        // Yaw 0 is where the horizontal offset wraps.
        let before = viewer.frame(upright(-0.001), secs(0.0)).unwrap();
        let before_x = real_left_edge(&viewer, before.tile_shift);
        let after = viewer.frame(upright(0.001), secs(0.1)).unwrap();
        let after_x = real_left_edge(&viewer, after.tile_shift);

        let width = WIDTH as f64;
        let moved = (before_x - after_x).rem_euclid(width);
        let moved = moved.min(width - moved);
        assert!(
            moved < 1.0,
            "{label}: left edge jumped from {before_x} to {after_x}"
        );

        // Seam copies hold the same pixels as the column they duplicate.
        let session = viewer.session().unwrap();
        for (_, tile) in session.window().slots() {
            let real = session.store().real(tile.real_col as i64, tile.row).unwrap();
            assert_eq!(tile.pixels, real.pixels, "{label}: column {}", tile.col);
        }
    }
}

#[test]
fn test_scan_confirms_point_under_center() {
    let mut viewer = ready_viewer();
    let report = viewer.frame(upright(0.0), secs(0.0)).unwrap();
    assert!(report.scan.is_scanning());
    assert!(report.overlay.show_scan_box);

    viewer.frame(upright(0.0), secs(0.5)).unwrap();
    let report = viewer.frame(upright(0.0), secs(1.2)).unwrap();
    assert!(matches!(report.scan, ScanPhase::Confirmed { .. }));
    assert!(!report.overlay.show_scan_box);

    let confirmed = viewer.session().unwrap().confirmed_point().unwrap();
    assert_eq!(confirmed.id, 5);
    assert_eq!(confirmed.description, vec!["Point 5".to_string()]);
}

#[test]
fn test_too_high_and_too_low() {
    let mut viewer = ready_viewer();
    let low = viewer
        .frame(OrientationSample::new(0.0, 0.5, 0.0), secs(0.0))
        .unwrap();
    assert_eq!(low.bound, VerticalBound::TooLow);

    let high = viewer
        .frame(OrientationSample::new(0.0, -3.5, 0.0), secs(0.1))
        .unwrap();
    assert_eq!(high.bound, VerticalBound::TooHigh);
}

#[test]
fn test_pause_freezes_offsets() {
    let mut viewer = ready_viewer();
    let before = viewer.frame(upright(0.1), secs(0.0)).unwrap();

    viewer.handle(ViewerEvent::TogglePause, secs(0.1)).unwrap();
    let paused = viewer.frame(upright(0.6), secs(0.2)).unwrap();
    assert!(paused.paused);
    assert_eq!(paused.offsets, before.offsets);
    assert!(paused.overlay.controls_visible);
    assert!(!paused.overlay.show_scan_box);

    // Yaw kept unwrapping while paused.
    viewer.handle(ViewerEvent::TogglePause, secs(0.3)).unwrap();
    let resumed = viewer.frame(upright(0.6), secs(0.4)).unwrap();
    assert!(!resumed.paused);
    assert_ne!(resumed.offsets, before.offsets);
    let yaw = viewer.session().unwrap().integrator().accumulated_yaw().unwrap();
    assert!((yaw - 0.6).abs() < 1e-12);
}

#[test]
fn test_touch_reveals_controls_briefly() {
    let mut viewer = ready_viewer();
    viewer.handle(ViewerEvent::Touch, secs(1.0)).unwrap();

    let shown = viewer.frame(upright(2.0), secs(1.5)).unwrap();
    assert!(shown.overlay.controls_visible);
    assert!(shown.overlay.show_scan_box);

    let hidden = viewer.frame(upright(2.0), secs(2.5)).unwrap();
    assert!(!hidden.overlay.controls_visible);
    assert!(!hidden.overlay.show_scan_box);
}

#[test]
fn test_calibration_through_events() {
    let mut viewer = ready_viewer();
    let held = viewer.frame(upright(0.3), secs(0.0)).unwrap();

    viewer.handle(ViewerEvent::BeginCalibration, secs(0.1)).unwrap();
    let during = viewer.frame(upright(1.3), secs(0.2)).unwrap();
    assert!((during.offsets.horizontal - held.offsets.horizontal).abs() < 1e-9);

    viewer.handle(ViewerEvent::EndCalibration, secs(0.3)).unwrap();
    let after = viewer.frame(upright(1.4), secs(0.4)).unwrap();
    assert!((after.offsets.horizontal - held.offsets.horizontal).abs() > 1.0);
}
