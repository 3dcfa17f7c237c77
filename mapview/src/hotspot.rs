//! Hotspot records and the ordered hotspot model.
//!
//! A [`Hotspot`] is a labelled point anchored to normalized image
//! coordinates. [`HotspotModel`] owns the ordered list for one map: list order
//! is display order, and the number shown on a marker is the hotspot's
//! position among *active* hotspots, computed on demand.
//!
//! The JSON transport is a plain array of hotspot objects. Decoding is
//! lenient: every missing field takes the value [`HotspotModel::add`] would
//! give it, coordinates are clamped onto the image, and duplicate or empty
//! ids are replaced with fresh ones so ids stay unique within a map.

#[cfg(test)]
#[path = "hotspot_test.rs"]
mod hotspot_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_HOTSPOT_COLOR, HOTSPOT_ID_PREFIX};
use crate::coords::{NormalizedPoint, clamp_percent};

/// Unique identifier for a hotspot within a map.
pub type HotspotId = String;

/// Generate a fresh hotspot id. Ids are random, so they are never reused.
#[must_use]
pub fn new_hotspot_id() -> HotspotId {
    format!("{HOTSPOT_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Whether `value` is a `#rrggbb` color.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

fn default_color() -> String {
    DEFAULT_HOTSPOT_COLOR.to_owned()
}

fn default_active() -> bool {
    true
}

/// A hotspot as stored in the map's hotspot list and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Stable unique token, generated at creation.
    #[serde(default)]
    pub id: HotspotId,
    /// Horizontal position in percent of the image's natural width.
    #[serde(default)]
    pub x: f64,
    /// Vertical position in percent of the image's natural height.
    #[serde(default)]
    pub y: f64,
    /// Author-facing label.
    #[serde(default)]
    pub title: String,
    /// Text shown next to the marker on the public view. May hold limited
    /// markup that the host sanitizes.
    #[serde(default)]
    pub label: String,
    /// Destination opened on click. Empty means not clickable.
    #[serde(default, alias = "blogUrl")]
    pub url: String,
    /// Marker color, `#rrggbb`.
    #[serde(default = "default_color")]
    pub color: String,
    /// Inactive hotspots are kept but neither rendered nor exported.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Hotspot {
    /// A new active hotspot at `(x, y)` percent with a fresh id and defaults.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            id: new_hotspot_id(),
            x: clamp_percent(x),
            y: clamp_percent(y),
            title: String::new(),
            label: String::new(),
            url: String::new(),
            color: default_color(),
            active: true,
        }
    }

    /// Position as a normalized point.
    #[must_use]
    pub fn position(&self) -> NormalizedPoint {
        NormalizedPoint::new(self.x, self.y)
    }

    /// Whether clicking the marker navigates anywhere.
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Bring a decoded record in line with the model invariants.
    fn normalize(&mut self) {
        self.x = clamp_percent(self.x);
        self.y = clamp_percent(self.y);
        if !is_hex_color(&self.color) {
            self.color = default_color();
        }
    }
}

/// Sparse update for a hotspot's editable text fields. Only present fields
/// are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "blogUrl")]
    pub url: Option<String>,
    /// Ignored unless it is a valid `#rrggbb` color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl HotspotPatch {
    /// Whether the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.label.is_none() && self.url.is_none() && self.color.is_none()
    }
}

/// Error decoding a hotspot list.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid hotspot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered hotspot list of one map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HotspotModel {
    hotspots: Vec<Hotspot>,
}

impl HotspotModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self { hotspots: Vec::new() }
    }

    /// Build a model from records, normalizing them the same way decoding does.
    #[must_use]
    pub fn from_hotspots(hotspots: Vec<Hotspot>) -> Self {
        let mut model = Self { hotspots };
        model.normalize();
        model
    }

    // --- Mutations ---

    /// Append a new active hotspot at `(x, y)` percent and return it.
    pub fn add(&mut self, x: f64, y: f64) -> Hotspot {
        let hotspot = Hotspot::new(x, y);
        self.hotspots.push(hotspot.clone());
        hotspot
    }

    /// Apply `patch` to the hotspot `id`. Returns false (and changes nothing)
    /// when the id is unknown.
    pub fn update(&mut self, id: &str, patch: &HotspotPatch) -> bool {
        let Some(hotspot) = self.get_mut(id) else {
            return false;
        };
        if let Some(title) = &patch.title {
            hotspot.title.clone_from(title);
        }
        if let Some(label) = &patch.label {
            hotspot.label.clone_from(label);
        }
        if let Some(url) = &patch.url {
            hotspot.url = url.trim().to_owned();
        }
        if let Some(color) = &patch.color {
            if is_hex_color(color) {
                hotspot.color = color.to_ascii_lowercase();
            }
        }
        true
    }

    /// Remove the hotspot `id`, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Hotspot> {
        let index = self.hotspots.iter().position(|h| h.id == id)?;
        Some(self.hotspots.remove(index))
    }

    /// Set the active flag of `id`. Returns false when the id is unknown.
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        let Some(hotspot) = self.get_mut(id) else {
            return false;
        };
        hotspot.active = active;
        true
    }

    /// Move `id` to `position`, clamped onto the image.
    pub fn move_to(&mut self, id: &str, position: NormalizedPoint) -> bool {
        let Some(hotspot) = self.get_mut(id) else {
            return false;
        };
        let clamped = position.clamped();
        hotspot.x = clamped.x;
        hotspot.y = clamped.y;
        true
    }

    // --- Queries ---

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Hotspot> {
        self.hotspots.iter_mut().find(|h| h.id == id)
    }

    /// All hotspots in list order, active or not.
    #[must_use]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Take the records out of the model.
    #[must_use]
    pub fn into_hotspots(self) -> Vec<Hotspot> {
        self.hotspots
    }

    /// Active hotspots in list order.
    pub fn active(&self) -> impl Iterator<Item = &Hotspot> {
        self.hotspots.iter().filter(|h| h.active)
    }

    /// Active hotspots paired with their 1-based display number.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Hotspot)> {
        self.active().enumerate().map(|(i, h)| (i + 1, h))
    }

    /// The 1-based position of `id` among active hotspots, or `None` when
    /// the id is unknown or inactive.
    #[must_use]
    pub fn reorder_index_for(&self, id: &str) -> Option<usize> {
        self.numbered().find(|(_, h)| h.id == id).map(|(n, _)| n)
    }

    /// Number of hotspots, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    /// Returns `true` if the model holds no hotspots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    /// Number of active hotspots.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    // --- JSON transport ---

    /// Serialize to a JSON array value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (non-finite coordinates).
    pub fn serialize(&self) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::to_value(&self.hotspots)?)
    }

    /// Serialize to a compact JSON string, the persisted form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (non-finite coordinates).
    pub fn to_json(&self) -> Result<String, DecodeError> {
        Ok(serde_json::to_string(&self.hotspots)?)
    }

    /// Decode a JSON array value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an array of hotspot objects.
    pub fn deserialize(value: serde_json::Value) -> Result<Self, DecodeError> {
        let hotspots: Vec<Hotspot> = serde_json::from_value(value)?;
        Ok(Self::from_hotspots(hotspots))
    }

    /// Decode the persisted JSON string. Empty input is an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of hotspot objects.
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let hotspots: Vec<Hotspot> = serde_json::from_str(text)?;
        Ok(Self::from_hotspots(hotspots))
    }

    /// Enforce coordinate, color and id invariants across the list.
    fn normalize(&mut self) {
        let mut seen = HashSet::with_capacity(self.hotspots.len());
        for hotspot in &mut self.hotspots {
            hotspot.normalize();
            if hotspot.id.trim().is_empty() || !seen.insert(hotspot.id.clone()) {
                hotspot.id = new_hotspot_id();
                seen.insert(hotspot.id.clone());
            }
        }
    }
}
