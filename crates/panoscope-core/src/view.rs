/// Offsets produced by the orientation integrator for one frame.
///
/// Both pixel offsets are the negated panorama position of the screen's
/// top-left corner, in extended (seam-band inclusive) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewOffsets {
    /// Horizontal offset, always in `[-width, 0)` for the real image width.
    pub horizontal: f64,
    pub vertical: f64,
    /// Screen rotation in degrees.
    pub rotation_deg: f64,
}

impl ViewOffsets {
    /// Panorama rectangle currently covered by a display of the given size.
    pub fn view_rect(&self, display_width: u32, display_height: u32) -> ViewRect {
        ViewRect {
            left: -self.horizontal,
            top: -self.vertical,
            width: display_width as f64,
            height: display_height as f64,
        }
    }
}

/// Screen rectangle expressed in extended panorama pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewRect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict containment: anchors on the screen border count as off-screen.
    pub fn shows(&self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right() && y > self.top && y < self.bottom()
    }

    pub fn shows_column(&self, x: f64) -> bool {
        x > self.left && x < self.right()
    }

    /// Rectangle of the given size centered on this one.
    pub fn centered(&self, width: f64, height: f64) -> ViewRect {
        let (cx, cy) = self.center();
        ViewRect {
            left: cx - width / 2.0,
            top: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Inclusive containment, used for the scan rectangle.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }
}

/// Where the screen sits relative to the panorama's vertical extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalBound {
    #[default]
    Within,
    /// The whole screen is above the panorama's first row.
    TooHigh,
    /// The whole screen is below the panorama's last row.
    TooLow,
}

impl VerticalBound {
    pub fn classify(view: &ViewRect, panorama_height: u32) -> Self {
        if view.bottom() <= 0.0 {
            Self::TooHigh
        } else if view.top >= panorama_height as f64 {
            Self::TooLow
        } else {
            Self::Within
        }
    }
}

impl std::fmt::Display for VerticalBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Within => write!(f, "Within panorama"),
            Self::TooHigh => write!(f, "Too high: tilt down"),
            Self::TooLow => write!(f, "Too low: tilt up"),
        }
    }
}
