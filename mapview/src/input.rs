//! Input model: buttons, modifiers, pointer targets, and gesture state.
//!
//! `Button`, `Modifiers` and `PointerTarget` capture what the host knows at
//! the time of a pointer event. `InputState` is the viewport gesture tracked
//! between press and release; `MarkerDrag` is the editor's per-marker drag,
//! the same Idle/Dragging shape applied to a single hotspot. The free
//! functions derive zoom factors from wheel and pinch input.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::coords::NormalizedPoint;
use crate::hotspot::HotspotId;
use crate::viewport::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held. In the editor this turns a press into a pan.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// What the pointer was over when the event fired.
///
/// Hosts with DOM event targeting report it directly; others can resolve it
/// with [`crate::hit::hotspot_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// The image or the empty container around it.
    Background,
    /// A hotspot marker.
    Hotspot(HotspotId),
}

impl PointerTarget {
    /// Whether the pointer is over a hotspot marker.
    #[must_use]
    pub fn is_hotspot(&self) -> bool {
        matches!(self, Self::Hotspot(_))
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Viewport gesture state.
///
/// Dragging and pinching are exclusive: the controller is in at most one of
/// them at any time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Single pointer or finger panning the image.
    Dragging {
        /// Container-local position of the previous event, used for the pan delta.
        last_screen: Point,
    },
    /// Two fingers zooming about their midpoint.
    Pinching {
        /// Finger distance at the previous event; the baseline for the next factor.
        last_distance: f64,
    },
}

/// Drag state of a single hotspot marker in the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MarkerDrag {
    /// No marker is being dragged.
    #[default]
    Idle,
    /// A marker follows the pointer.
    Dragging {
        /// Id of the hotspot being dragged.
        id: HotspotId,
        /// Container-local position of the press.
        press: Point,
        /// Hotspot position at the press.
        origin: NormalizedPoint,
        /// Whether the pointer left the press position since the press.
        moved: bool,
    },
}

impl MarkerDrag {
    /// Start dragging the marker of `id`, sitting at `origin`, from `press`.
    pub fn begin(&mut self, id: HotspotId, press: Point, origin: NormalizedPoint) {
        *self = Self::Dragging { id, press, origin, moved: false };
    }

    /// Advance the drag to `current`, returning the dragged id, its position
    /// at the press and the screen offset from the press. `None` when idle.
    ///
    /// The offset is measured from the press rather than the previous event,
    /// so a marker held at an edge stays put until the pointer comes back.
    pub fn advance(&mut self, current: Point) -> Option<(HotspotId, NormalizedPoint, Point)> {
        let Self::Dragging { id, press, origin, moved } = self else {
            return None;
        };
        let offset = current - *press;
        if offset != Point::default() {
            *moved = true;
        }
        Some((id.clone(), *origin, offset))
    }

    /// Finish the drag, returning the id when the marker actually moved.
    pub fn finish(&mut self) -> Option<HotspotId> {
        let previous = std::mem::take(self);
        match previous {
            Self::Dragging { id, moved: true, .. } => Some(id),
            _ => None,
        }
    }

    /// Whether a marker is currently being dragged.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Zoom factor for one discrete wheel event.
///
/// Scrolling down zooms out, scrolling up zooms in, and a purely horizontal
/// scroll leaves the zoom alone.
#[must_use]
pub fn wheel_factor(delta: WheelDelta) -> f64 {
    if delta.dy > 0.0 {
        WHEEL_ZOOM_OUT
    } else if delta.dy < 0.0 {
        WHEEL_ZOOM_IN
    } else {
        1.0
    }
}

/// Distance between two touch points.
#[must_use]
pub fn touch_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Midpoint of two touch points.
#[must_use]
pub fn touch_center(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Zoom factor for one pinch frame, `current / previous`.
///
/// Returns `None` when there is nothing to apply: a zero (or invalid)
/// previous distance, or an unchanged distance.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn pinch_factor(previous: f64, current: f64) -> Option<f64> {
    if previous.is_nan() || previous <= 0.0 || !current.is_finite() || current <= 0.0 {
        return None;
    }
    let factor = current / previous;
    if factor == 1.0 {
        return None;
    }
    Some(factor)
}
