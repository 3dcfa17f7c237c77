//! Wire types for the map persistence collaborator.
//!
//! The engine never stores maps itself. It builds a [`SaveMapRequest`] from
//! its in-memory state and receives [`MapRecord`]s back; the service and the
//! command-line client share these shapes so all three agree on the JSON.
//! Hotspots travel as the serialized JSON string of the hotspot list, the
//! same opaque payload the store keeps.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hotspot::{DecodeError, HotspotModel};

/// Unique identifier for a stored map.
pub type MapId = Uuid;

/// Create (no `id`) or update (with `id`) a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMapRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MapId>,
    pub title: String,
    pub image_url: String,
    /// Serialized hotspot list (JSON array text).
    #[serde(default)]
    pub hotspots: String,
}

impl SaveMapRequest {
    /// The first required field that is blank, if any.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.image_url.trim().is_empty() {
            Some("image_url")
        } else {
            None
        }
    }
}

/// Reply to a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMap {
    pub id: MapId,
}

/// A stored map as returned by `getMap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: MapId,
    pub title: String,
    pub image_url: String,
    /// Serialized hotspot list (JSON array text).
    pub hotspots: String,
    /// Creation time, unix milliseconds.
    pub created_at: i64,
    /// Last update time, unix milliseconds.
    pub updated_at: i64,
}

impl MapRecord {
    /// Decode the stored hotspot list.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored payload is not a hotspot JSON array.
    pub fn hotspot_model(&self) -> Result<HotspotModel, DecodeError> {
        HotspotModel::from_json(&self.hotspots)
    }

    /// Summary row for listings.
    #[must_use]
    pub fn summary(&self) -> MapSummary {
        let hotspot_count = self.hotspot_model().map_or(0, |m| m.len());
        MapSummary {
            id: self.id,
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            hotspot_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing row returned by `listMaps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    pub id: MapId,
    pub title: String,
    pub image_url: String,
    pub hotspot_count: usize,
    pub created_at: i64,
    pub updated_at: i64,
}
