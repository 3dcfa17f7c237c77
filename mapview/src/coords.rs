//! Conversions between screen pixels and normalized image percentages.
//!
//! Normalized coordinates express a position as a percentage of the image's
//! natural width and height, so they do not depend on the current pan or
//! zoom. The wrapper layer that holds the image is sized to the image's
//! natural size and carries the viewport transform; hotspot markers are
//! placed inside it, so placement never applies scale or offset a second time.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PERCENT;
use crate::viewport::{Point, Size, Viewport};

/// Client rect of the container element, in page CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Convert a page point into a point local to this rect.
    #[must_use]
    pub fn to_local(&self, page: Point) -> Point {
        Point::new(page.x - self.left, page.y - self.top)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A position in percent of the image's natural width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components lie on the image, `[0, 100]` inclusive.
    #[must_use]
    pub fn is_within_image(&self) -> bool {
        (0.0..=MAX_PERCENT).contains(&self.x) && (0.0..=MAX_PERCENT).contains(&self.y)
    }

    /// Clamp both components onto the image.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self::new(clamp_percent(self.x), clamp_percent(self.y))
    }
}

/// Clamp a percentage into `[0, 100]`. NaN and `-0.0` map to 0.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    // adding +0.0 turns -0.0 into +0.0
    if value.is_nan() { 0.0 } else { value.clamp(0.0, MAX_PERCENT) + 0.0 }
}

/// Convert a page point to normalized image coordinates.
///
/// The container offset and viewport offset are removed, the scale is
/// divided out, and the result is expressed relative to the unscaled wrapper.
/// The result is not clamped: callers check [`NormalizedPoint::is_within_image`]
/// to tell clicks on the image from clicks beside it. A degenerate wrapper
/// yields `(0, 0)`.
#[must_use]
pub fn screen_to_normalized(page: Point, container: Rect, viewport: &Viewport, wrapper: Size) -> NormalizedPoint {
    if !wrapper.is_positive() {
        return NormalizedPoint::default();
    }
    let image = viewport.screen_to_image(container.to_local(page));
    NormalizedPoint::new(image.x / wrapper.width * MAX_PERCENT, image.y / wrapper.height * MAX_PERCENT)
}

/// Pixel position of a normalized point inside the untransformed wrapper.
#[must_use]
pub fn normalized_to_screen(point: NormalizedPoint, wrapper: Size) -> Point {
    Point::new(point.x / MAX_PERCENT * wrapper.width, point.y / MAX_PERCENT * wrapper.height)
}

/// Convert a container-local screen delta to a delta in percent.
///
/// Used when dragging a marker: the pointer moves in screen pixels while the
/// marker lives in the scaled wrapper.
#[must_use]
pub fn screen_delta_to_normalized(delta: Point, viewport: &Viewport, wrapper: Size) -> NormalizedPoint {
    if !wrapper.is_positive() {
        return NormalizedPoint::default();
    }
    NormalizedPoint::new(
        viewport.screen_dist_to_image(delta.x) / wrapper.width * MAX_PERCENT,
        viewport.screen_dist_to_image(delta.y) / wrapper.height * MAX_PERCENT,
    )
}

/// Container-local screen position of a normalized point under `viewport`.
#[must_use]
pub fn normalized_to_container(point: NormalizedPoint, viewport: &Viewport, wrapper: Size) -> Point {
    viewport.image_to_screen(normalized_to_screen(point, wrapper))
}
