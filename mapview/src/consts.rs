//! Shared numeric constants for the mapview crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lowest zoom factor. The image is never shown below its natural size.
pub const MIN_SCALE: f64 = 1.0;

/// Highest zoom factor.
pub const MAX_SCALE: f64 = 5.0;

/// Zoom factor applied for one wheel notch towards the user (scroll up).
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Zoom factor applied for one wheel notch away from the user (scroll down).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Zoom factor of the `+` control button.
pub const BUTTON_ZOOM_IN: f64 = 1.2;

/// Zoom factor of the `-` control button.
pub const BUTTON_ZOOM_OUT: f64 = 0.8;

// ── Hotspots ────────────────────────────────────────────────────

/// Marker color assigned to new hotspots and to records without a valid one.
pub const DEFAULT_HOTSPOT_COLOR: &str = "#4f46e5";

/// Prefix of generated hotspot ids.
pub const HOTSPOT_ID_PREFIX: &str = "hotspot_";

/// Upper bound of a normalized coordinate (percent).
pub const MAX_PERCENT: f64 = 100.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space radius in pixels within which a pointer hits a marker.
pub const MARKER_HIT_RADIUS_PX: f64 = 12.0;
