//! Viewport state and the pan/zoom controller.
//!
//! All positions handled here are container-local CSS pixels: the host
//! subtracts the container's client rect before calling in. The image layer
//! is drawn at `offset` and scaled by `scale` about its own top-left corner,
//! so a container point `p` shows the image point `(p - offset) / scale`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::input::{Button, InputState, PointerTarget, pinch_factor, touch_center, touch_distance};

/// A point or a delta in either screen or image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center point of a box of this size anchored at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Pan/zoom transform of the image layer.
///
/// `scale` stays within `[MIN_SCALE, MAX_SCALE]`. `offset` is the translation
/// of the layer relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: MIN_SCALE, offset: Point::default() }
    }
}

impl Viewport {
    /// Convert a container-local point to unscaled image-layer pixels.
    #[must_use]
    pub fn screen_to_image(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.offset.x) / self.scale,
            y: (screen.y - self.offset.y) / self.scale,
        }
    }

    /// Convert unscaled image-layer pixels to a container-local point.
    #[must_use]
    pub fn image_to_screen(&self, image: Point) -> Point {
        Point {
            x: image.x * self.scale + self.offset.x,
            y: image.y * self.scale + self.offset.y,
        }
    }

    /// Convert a screen-space distance to image-space pixels.
    #[must_use]
    pub fn screen_dist_to_image(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}

/// Owns the viewport of one image container and the gesture driving it.
///
/// Every mutation happens synchronously inside the call; there is no shared
/// state between controllers.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    viewport: Viewport,
    container: Size,
    image: Size,
    input: InputState,
}

impl ViewportController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        self.viewport.offset
    }

    #[must_use]
    pub fn container(&self) -> Size {
        self.container
    }

    /// Natural size of the image, which is also the unscaled wrapper size.
    #[must_use]
    pub fn image(&self) -> Size {
        self.image
    }

    #[must_use]
    pub fn input(&self) -> InputState {
        self.input
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Dragging { .. })
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.input, InputState::Pinching { .. })
    }

    // --- Reset ---

    /// Fit the image into the container, never below natural size, centered.
    ///
    /// Any gesture in progress is cancelled. Calling this twice with the same
    /// sizes yields the same state.
    pub fn reset(&mut self, container: Size, image: Size) {
        self.container = container;
        self.image = image;
        self.input = InputState::Idle;

        if !image.is_positive() {
            self.viewport = Viewport::default();
            return;
        }

        let fit = (container.width / image.width).min(container.height / image.height);
        let scale = fit.clamp(MIN_SCALE, MAX_SCALE);
        self.viewport = Viewport {
            scale,
            offset: Point::new(
                (container.width - image.width * scale) / 2.0,
                (container.height - image.height * scale) / 2.0,
            ),
        };
    }

    /// Reset against the last known container and image sizes.
    pub fn reset_view(&mut self) {
        self.reset(self.container, self.image);
    }

    /// The container changed size: cancel any gesture and reset.
    pub fn resize(&mut self, container: Size) {
        self.reset(container, self.image);
    }

    // --- Zoom / pan ---

    /// Multiply the scale by `factor`, keeping the image point under `anchor`
    /// fixed on screen. The anchor defaults to the container center.
    ///
    /// The resulting scale is clamped to `[MIN_SCALE, MAX_SCALE]`; when the
    /// clamped scale equals the current one nothing changes. Returns whether
    /// the viewport changed.
    #[allow(clippy::float_cmp)]
    pub fn zoom_at_point(&mut self, factor: f64, anchor: Option<Point>) -> bool {
        if !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        let anchor = anchor.unwrap_or_else(|| self.container.center());
        let image_anchor = self.viewport.screen_to_image(anchor);

        let new_scale = (self.viewport.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if new_scale == self.viewport.scale {
            return false;
        }

        self.viewport.offset = Point::new(anchor.x - image_anchor.x * new_scale, anchor.y - image_anchor.y * new_scale);
        self.viewport.scale = new_scale;
        true
    }

    /// Translate the image layer. Panning past the image edges is allowed.
    pub fn pan(&mut self, delta: Point) {
        self.viewport.offset = self.viewport.offset + delta;
    }

    // --- Pointer drag ---

    /// Start a pan drag at `start`.
    ///
    /// Only the primary button over the background starts a drag; a press on
    /// a hotspot marker suppresses it. A pinch in progress also wins over a
    /// new drag. Returns whether the controller is now dragging.
    pub fn begin_drag(&mut self, start: Point, button: Button, target: &PointerTarget) -> bool {
        if button != Button::Primary || target.is_hotspot() || self.is_pinching() {
            return false;
        }
        self.input = InputState::Dragging { last_screen: start };
        true
    }

    /// Pan by the movement since the previous drag position.
    ///
    /// Returns whether a pan was applied; outside a drag this is a no-op.
    pub fn continue_drag(&mut self, current: Point) -> bool {
        let InputState::Dragging { last_screen } = self.input else {
            return false;
        };
        self.input = InputState::Dragging { last_screen: current };
        self.pan(current - last_screen);
        true
    }

    /// Release the drag. Safe to call in any state.
    pub fn end_drag(&mut self) {
        if self.is_dragging() {
            self.input = InputState::Idle;
        }
    }

    /// Drop whatever gesture is in progress.
    pub fn cancel_gesture(&mut self) {
        self.input = InputState::Idle;
    }

    // --- Pinch ---

    /// Start (or restart) a pinch with a fresh distance baseline. Cancels any
    /// pointer drag.
    pub fn begin_pinch(&mut self, a: Point, b: Point) {
        self.input = InputState::Pinching { last_distance: touch_distance(a, b) };
    }

    /// Zoom by the change in finger distance about the finger midpoint.
    ///
    /// The baseline always advances to the current distance. When not yet
    /// pinching this only establishes the baseline. Returns whether the
    /// viewport changed.
    pub fn continue_pinch(&mut self, a: Point, b: Point) -> bool {
        let InputState::Pinching { last_distance } = self.input else {
            self.begin_pinch(a, b);
            return false;
        };
        let distance = touch_distance(a, b);
        self.input = InputState::Pinching { last_distance: distance };

        let Some(factor) = pinch_factor(last_distance, distance) else {
            return false;
        };
        self.zoom_at_point(factor, Some(touch_center(a, b)))
    }

    // --- Touch ---

    /// Touches went down. Two or more fingers start a pinch; a single finger
    /// starts a drag unless it landed on a hotspot.
    pub fn touch_start(&mut self, touches: &[Point], target: &PointerTarget) -> bool {
        match touches {
            [a, b, ..] => {
                self.begin_pinch(*a, *b);
                true
            }
            [single] => self.begin_drag(*single, Button::Primary, target),
            [] => {
                self.cancel_gesture();
                false
            }
        }
    }

    /// Touches moved. Returns whether the viewport changed.
    ///
    /// A single finger left over from a pinch becomes a drag anchored at its
    /// current position, so the image does not jump.
    pub fn touch_move(&mut self, touches: &[Point]) -> bool {
        match (touches, self.input) {
            ([a, b, ..], _) => self.continue_pinch(*a, *b),
            ([single], InputState::Dragging { .. }) => self.continue_drag(*single),
            ([single], InputState::Pinching { .. }) => {
                self.input = InputState::Dragging { last_screen: *single };
                false
            }
            _ => false,
        }
    }

    /// Touches were lifted; `remaining` are the fingers still down.
    ///
    /// With no fingers left the controller returns to idle. Remaining fingers
    /// re-baseline the gesture they now form.
    pub fn touch_end(&mut self, remaining: &[Point]) {
        match (remaining, self.input) {
            ([a, b, ..], _) => self.begin_pinch(*a, *b),
            ([single], InputState::Pinching { .. } | InputState::Dragging { .. }) => {
                self.input = InputState::Dragging { last_screen: *single };
            }
            _ => self.input = InputState::Idle,
        }
    }
}
