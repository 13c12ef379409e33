use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use crate::config::ViewerConfig;
use crate::grid::PanoramaGeometry;
use crate::view::ViewOffsets;

use super::unwrap::YawUnwrapper;
use super::OrientationSample;

/// Reduce a horizontal offset into `[-(extended_width - display_width), 0)`.
///
/// When the seam band is exactly one display wide, that span is the real
/// panorama width. See [`wrap_loop`] for the general case.
pub fn wrap_horizontal(offset: f64, extended_width: f64, display_width: f64) -> f64 {
    wrap_loop(offset, extended_width - display_width)
}

/// Reduce a horizontal offset into `[-circumference, 0)`.
///
/// The horizontal axis is a closed loop as long as the real panorama. Values
/// already in range are returned as-is, which makes the reduction
/// idempotent.
pub fn wrap_loop(offset: f64, circumference: f64) -> f64 {
    let span = circumference;
    if span <= 0.0 {
        return 0.0;
    }
    if !offset.is_finite() {
        return -span;
    }
    if offset >= -span && offset < 0.0 {
        return offset;
    }

    let wrapped = offset.rem_euclid(span) - span;
    // rem_euclid can round up to `span` for tiny negative inputs
    if wrapped >= 0.0 {
        wrapped - span
    } else {
        wrapped
    }
}

/// Pixel scale and bias that map angles onto the extended panorama.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub extended_width: f64,
    /// Width of the original image; the horizontal offset wraps over it.
    /// A seam band at least one display wide keeps every offset in
    /// `[-loop_width, 0)` backed by pixels.
    pub loop_width: f64,
    pub vertical_bias: f64,
}

impl Projection {
    pub fn from_geometry(geometry: &PanoramaGeometry, config: &ViewerConfig) -> Self {
        let vertical_bias = config.orientation.vertical_bias.unwrap_or_else(|| {
            -(geometry.height as f64 - config.display.height as f64) / 2.0
        });
        Self {
            extended_width: geometry.extended_width() as f64,
            loop_width: geometry.width as f64,
            vertical_bias,
        }
    }

    fn pixels_per_radian(&self) -> f64 {
        self.extended_width / TAU
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Axes {
    pitch: f64,
    roll: f64,
    yaw: f64,
}

impl Axes {
    fn minus(self, other: Axes) -> Axes {
        Axes {
            pitch: self.pitch - other.pitch,
            roll: self.roll - other.roll,
            yaw: self.yaw - other.yaw,
        }
    }
}

/// Converts raw attitude samples into view offsets.
///
/// Yaw is unwrapped into a continuous angle before it is projected, so the
/// horizontal offset never jumps when the sensor wraps at ±π. Pitch and roll
/// are mapped linearly.
#[derive(Clone, Debug)]
pub struct OrientationIntegrator {
    projection: Projection,
    unwrapper: YawUnwrapper,
    current: Option<Axes>,
    baseline: Axes,
    /// `current - baseline` captured when a calibration gesture starts.
    capture: Option<Axes>,
    calibrating: bool,
}

impl OrientationIntegrator {
    pub fn new(projection: Projection, near_zero_band: f64) -> Self {
        Self {
            projection,
            unwrapper: YawUnwrapper::new(near_zero_band),
            current: None,
            baseline: Axes::default(),
            capture: None,
            calibrating: false,
        }
    }

    /// Feed one sample and return the frame's offsets.
    pub fn integrate(&mut self, sample: OrientationSample) -> ViewOffsets {
        if sample.is_finite() {
            let yaw = self.unwrapper.push(sample.yaw);
            let current = Axes {
                pitch: sample.pitch,
                roll: sample.roll,
                yaw,
            };
            self.current = Some(current);

            if self.calibrating {
                let capture = *self.capture.get_or_insert(current.minus(self.baseline));
                self.baseline = current.minus(capture);
            }
        } else {
            debug!(?sample, "Dropping non-finite orientation sample");
        }

        self.offsets()
    }

    /// Offsets for the latest sample without consuming a new one.
    pub fn offsets(&self) -> ViewOffsets {
        let Some(current) = self.current else {
            return ViewOffsets {
                horizontal: wrap_loop(0.0, self.projection.loop_width),
                vertical: self.projection.vertical_bias,
                rotation_deg: 0.0,
            };
        };

        let rel = current.minus(self.baseline);
        let scale = self.projection.pixels_per_radian();

        let horizontal = wrap_loop(rel.yaw * scale, self.projection.loop_width);
        let vertical = -(rel.roll + FRAC_PI_2) * scale + self.projection.vertical_bias;
        let rotation_deg = rel.pitch.to_degrees();

        ViewOffsets {
            horizontal,
            vertical,
            rotation_deg,
        }
    }

    /// Start a calibration gesture: the view holds still while the device
    /// moves, so releasing the gesture re-centers the panorama.
    pub fn begin_calibration(&mut self) {
        self.calibrating = true;
        self.capture = self.current.map(|c| c.minus(self.baseline));
        debug!("Calibration started");
    }

    /// Freeze the baseline captured during the gesture.
    pub fn end_calibration(&mut self) {
        if self.calibrating {
            debug!(
                pitch = self.baseline.pitch,
                roll = self.baseline.roll,
                yaw = self.baseline.yaw,
                "Calibration committed"
            );
        }
        self.calibrating = false;
        self.capture = None;
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibrating
    }

    /// Continuous yaw in radians, or `None` before the first sample.
    pub fn accumulated_yaw(&self) -> Option<f64> {
        self.unwrapper.is_seeded().then(|| self.unwrapper.accumulated())
    }

    pub fn last_raw_yaw(&self) -> Option<f64> {
        self.unwrapper.last_raw()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}
