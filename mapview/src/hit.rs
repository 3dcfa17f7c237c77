#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::MARKER_HIT_RADIUS_PX;
use crate::coords::normalized_to_container;
use crate::hotspot::{HotspotId, HotspotModel};
use crate::input::PointerTarget;
use crate::viewport::{Point, Size, Viewport};

/// Find the topmost active hotspot whose marker center lies within
/// [`MARKER_HIT_RADIUS_PX`] of the container-local point `screen`.
///
/// Later hotspots render above earlier ones, so the list is searched from
/// the end.
#[must_use]
pub fn hotspot_at(screen: Point, viewport: &Viewport, wrapper: Size, model: &HotspotModel) -> Option<HotspotId> {
    model
        .hotspots()
        .iter()
        .rev()
        .filter(|h| h.active)
        .find(|h| {
            let center = normalized_to_container(h.position(), viewport, wrapper);
            (center.x - screen.x).hypot(center.y - screen.y) <= MARKER_HIT_RADIUS_PX
        })
        .map(|h| h.id.clone())
}

/// Resolve the pointer target for hosts without their own event targeting.
#[must_use]
pub fn target_at(screen: Point, viewport: &Viewport, wrapper: Size, model: &HotspotModel) -> PointerTarget {
    hotspot_at(screen, viewport, wrapper, model).map_or(PointerTarget::Background, PointerTarget::Hotspot)
}
