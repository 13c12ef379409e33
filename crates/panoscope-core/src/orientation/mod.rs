pub mod integrator;
pub mod unwrap;

pub use integrator::{wrap_horizontal, wrap_loop, OrientationIntegrator, Projection};
pub use unwrap::{yaw_delta, YawUnwrapper};

/// One raw attitude reading from the device, in radians.
///
/// `yaw` wraps at ±π. `pitch` and `roll` stay well inside ±π while the
/// device is held in front of the user.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationSample {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl OrientationSample {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Self { pitch, roll, yaw }
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.roll.is_finite() && self.yaw.is_finite()
    }
}
