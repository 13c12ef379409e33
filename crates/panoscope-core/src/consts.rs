/// Default display width in pixels (landscape).
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1024;

/// Default display height in pixels (landscape).
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 768;

/// Default tile width. The seam band and display width should be multiples of it.
pub const DEFAULT_TILE_WIDTH: u32 = 256;

/// Default tile height. Tall tiles keep a panorama to one or two tile rows.
pub const DEFAULT_TILE_HEIGHT: u32 = 2048;

/// Extra tile columns/rows kept resident beyond what the display covers,
/// so a viewport starting mid-tile is always fully backed.
pub const WINDOW_SLACK_TILES: usize = 2;

/// Default scan rectangle width in screen pixels.
pub const DEFAULT_SCANNER_WIDTH: u32 = 300;

/// Default scan rectangle height in screen pixels.
pub const DEFAULT_SCANNER_HEIGHT: u32 = 200;

/// Seconds a point must stay inside the scan rectangle to be confirmed.
pub const DEFAULT_DWELL_SECS: f64 = 1.0;

/// Yaw readings closer than this to zero (radians) on both sides of a sign
/// change are treated as a zero crossing rather than a ±π wrap.
pub const DEFAULT_NEAR_ZERO_BAND: f64 = 0.5;

/// Seconds the on-screen controls stay visible after a touch.
pub const DEFAULT_CONTROLS_REVEAL_SECS: f64 = 1.0;

/// Soft line length for caption wrapping; lines break at the next space.
pub const CAPTION_SOFT_LIMIT: usize = 40;

/// Hard line length for caption wrapping; longer words are hyphenated.
pub const CAPTION_HARD_LIMIT: usize = 45;

/// Points farther than this fraction of the extended width from the screen
/// are not counted in direction hints.
pub const HINT_REACH_FRACTION: f64 = 1.0 / 3.0;
