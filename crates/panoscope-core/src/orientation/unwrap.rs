use std::f64::consts::PI;

/// Signed change between two consecutive yaw readings.
///
/// Readings live in `(-π, π]`. A sign change close to zero is ordinary
/// motion; a sign change anywhere else means the reading wrapped through ±π,
/// and the true motion is the short way around the circle.
///
/// Near zero the result is the true motion `curr - prev`, signed by the
/// direction of travel. It is not the summed magnitude `|prev| + |curr|`
/// with a sign picked from either reading.
pub fn yaw_delta(prev: f64, curr: f64, near_zero_band: f64) -> f64 {
    if prev == curr {
        return 0.0;
    }

    let prev_negative = prev < 0.0;
    let curr_negative = curr < 0.0;

    if prev_negative == curr_negative {
        return curr - prev;
    }

    if prev.abs() < near_zero_band && curr.abs() < near_zero_band {
        return curr - prev;
    }

    // Distance from each reading to the ±π boundary.
    let magnitude = ((PI - prev.abs()) + (PI - curr.abs())).max(0.0);
    if prev_negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Turns a stream of wrapping yaw readings into one continuous angle.
#[derive(Clone, Debug)]
pub struct YawUnwrapper {
    near_zero_band: f64,
    last_raw: Option<f64>,
    accumulated: f64,
}

impl YawUnwrapper {
    pub fn new(near_zero_band: f64) -> Self {
        Self {
            near_zero_band,
            last_raw: None,
            accumulated: 0.0,
        }
    }

    /// Feed one reading and return the accumulated yaw.
    ///
    /// The first reading seeds the accumulator. Non-finite readings are
    /// dropped and the previous value is held.
    pub fn push(&mut self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return self.accumulated;
        }

        match self.last_raw {
            None => self.accumulated = raw,
            Some(prev) => self.accumulated += yaw_delta(prev, raw, self.near_zero_band),
        }
        self.last_raw = Some(raw);
        self.accumulated
    }

    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }

    pub fn last_raw(&self) -> Option<f64> {
        self.last_raw
    }

    pub fn is_seeded(&self) -> bool {
        self.last_raw.is_some()
    }
}
