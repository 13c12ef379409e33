use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CONTROLS_REVEAL_SECS, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH,
    DEFAULT_DWELL_SECS, DEFAULT_NEAR_ZERO_BAND, DEFAULT_SCANNER_HEIGHT, DEFAULT_SCANNER_WIDTH,
    DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
};
use crate::error::{PanoError, Result};

/// Complete viewer configuration. Every section falls back to its defaults,
/// so a partial TOML file only needs the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub tiles: TileConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub orientation: OrientationConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DISPLAY_WIDTH,
            height: DEFAULT_DISPLAY_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    pub width: u32,
    pub height: u32,
    /// Width in pixels of the duplicated seam band. `None` uses the display width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seam_band: Option<u32>,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILE_WIDTH,
            height: DEFAULT_TILE_HEIGHT,
            seam_band: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub width: u32,
    pub height: u32,
    /// Seconds a point must stay in the rectangle before it is confirmed.
    #[serde(default = "default_dwell_secs")]
    pub dwell_secs: f64,
}

fn default_dwell_secs() -> f64 {
    DEFAULT_DWELL_SECS
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCANNER_WIDTH,
            height: DEFAULT_SCANNER_HEIGHT,
            dwell_secs: DEFAULT_DWELL_SECS,
        }
    }
}

impl ScannerConfig {
    /// Dwell threshold; invalid values read as zero (rejected by `validate`).
    pub fn dwell(&self) -> Duration {
        Duration::try_from_secs_f64(self.dwell_secs).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientationConfig {
    /// Radians around zero inside which a yaw sign change is a zero crossing.
    #[serde(default = "default_near_zero_band")]
    pub near_zero_band: f64,
    /// Pixel bias added to the vertical offset. `None` centers the panorama
    /// vertically when the device is held upright.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_bias: Option<f64>,
}

fn default_near_zero_band() -> f64 {
    DEFAULT_NEAR_ZERO_BAND
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            near_zero_band: DEFAULT_NEAR_ZERO_BAND,
            vertical_bias: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Seconds the on-screen controls stay visible after a touch.
    #[serde(default = "default_reveal_secs")]
    pub reveal_secs: f64,
}

fn default_reveal_secs() -> f64 {
    DEFAULT_CONTROLS_REVEAL_SECS
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            reveal_secs: DEFAULT_CONTROLS_REVEAL_SECS,
        }
    }
}

impl ControlsConfig {
    pub fn reveal(&self) -> Duration {
        Duration::try_from_secs_f64(self.reveal_secs).unwrap_or_default()
    }
}

impl ViewerConfig {
    /// Seam band width in pixels, defaulting to the display width.
    pub fn seam_band_width(&self) -> u32 {
        self.tiles.seam_band.unwrap_or(self.display.width)
    }

    /// Reject configurations the viewport math cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.display.width == 0 || self.display.height == 0 {
            return Err(PanoError::InvalidConfig(format!(
                "display must be non-empty, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.tiles.width == 0 || self.tiles.height == 0 {
            return Err(PanoError::InvalidConfig(format!(
                "tiles must be non-empty, got {}x{}",
                self.tiles.width, self.tiles.height
            )));
        }
        if self.seam_band_width() < self.display.width {
            return Err(PanoError::InvalidConfig(format!(
                "seam band ({} px) must be at least the display width ({} px)",
                self.seam_band_width(),
                self.display.width
            )));
        }
        if self.scanner.width == 0 || self.scanner.height == 0 {
            return Err(PanoError::InvalidConfig(
                "scanner rectangle must be non-empty".into(),
            ));
        }
        if !(self.scanner.dwell_secs.is_finite() && self.scanner.dwell_secs > 0.0) {
            return Err(PanoError::InvalidConfig(format!(
                "dwell must be a positive number of seconds, got {}",
                self.scanner.dwell_secs
            )));
        }
        if !(self.orientation.near_zero_band > 0.0
            && self.orientation.near_zero_band < std::f64::consts::PI)
        {
            return Err(PanoError::InvalidConfig(format!(
                "near-zero band must lie in (0, pi), got {}",
                self.orientation.near_zero_band
            )));
        }
        if !(self.controls.reveal_secs.is_finite() && self.controls.reveal_secs >= 0.0) {
            return Err(PanoError::InvalidConfig(format!(
                "controls reveal must be non-negative, got {}",
                self.controls.reveal_secs
            )));
        }
        Ok(())
    }
}
