//! Rendering: the render scene and its application to the DOM.
//!
//! [`scene`] is pure: it turns viewport and hotspot state into the values a
//! page needs, namely the wrapper transform and one [`Marker`] per active
//! hotspot positioned in percent of the wrapper's own box. Markers are never
//! recomputed against the scale, because the transform already applies to
//! the whole wrapper layer.
//!
//! [`apply_transform`] is the only place that touches [`web_sys`]. All fallible
//! DOM calls propagate errors via `Result<(), JsValue>`.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::hotspot::{HotspotId, HotspotModel};
use crate::viewport::Viewport;

/// CSS custom property carrying the current scale, for counter-scaled marker styling.
pub const SCALE_PROPERTY: &str = "--map-scale";

/// One hotspot marker as the page draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: HotspotId,
    /// 1-based position among active hotspots.
    pub number: usize,
    /// Left position in percent of the wrapper width.
    pub left_pct: f64,
    /// Top position in percent of the wrapper height.
    pub top_pct: f64,
    pub color: String,
    pub title: String,
    /// Public label; omitted from the page when empty.
    pub label: String,
    /// Navigation target; `None` when the marker is not clickable.
    pub url: Option<String>,
}

/// Everything a page needs to draw one image map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderScene {
    /// CSS `transform` value for the wrapper layer.
    pub transform: String,
    pub scale: f64,
    /// Zoom indicator text, e.g. `"150%"`.
    pub zoom_label: String,
    pub markers: Vec<Marker>,
}

/// CSS transform of the wrapper layer: translate first, then scale.
#[must_use]
pub fn transform_css(viewport: &Viewport) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        viewport.offset.x, viewport.offset.y, viewport.scale
    )
}

/// Zoom indicator text, the scale as a rounded percentage.
#[must_use]
pub fn zoom_label(scale: f64) -> String {
    format!("{:.0}%", (scale * 100.0).round())
}

/// Build the scene for the current state.
#[must_use]
pub fn scene(viewport: &Viewport, model: &HotspotModel) -> RenderScene {
    let markers = model
        .numbered()
        .map(|(number, h)| Marker {
            id: h.id.clone(),
            number,
            left_pct: h.x,
            top_pct: h.y,
            color: h.color.clone(),
            title: h.title.clone(),
            label: h.label.clone(),
            url: h.is_clickable().then(|| h.url.clone()),
        })
        .collect();

    RenderScene {
        transform: transform_css(viewport),
        scale: viewport.scale,
        zoom_label: zoom_label(viewport.scale),
        markers,
    }
}

/// Write the viewport transform onto the wrapper element.
///
/// # Errors
///
/// Returns `Err` if the browser rejects a style property.
pub fn apply_transform(wrapper: &HtmlElement, viewport: &Viewport) -> Result<(), JsValue> {
    let style = wrapper.style();
    style.set_property("transform", &transform_css(viewport))?;
    style.set_property(SCALE_PROPERTY, &viewport.scale.to_string())?;
    Ok(())
}
