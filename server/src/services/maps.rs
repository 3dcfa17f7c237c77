//! Map service: save, fetch, delete, list, and CSV transfer.
//!
//! DESIGN
//! ======
//! Every hotspot payload entering the store is decoded through
//! `HotspotModel`, so stored JSON is always normalized (clamped coordinates,
//! valid colors, unique ids) regardless of what the client sent. The service
//! is stateless; all state lives behind the `MapStore` passed in.
//!
//! ERROR HANDLING
//! ==============
//! Validation happens before any store write. A failed save or import leaves
//! the stored record exactly as it was.

#[cfg(test)]
#[path = "maps_test.rs"]
mod maps_test;

use std::time::{SystemTime, UNIX_EPOCH};

use mapview::csv::{ExportError, ImportError};
use mapview::hotspot::{DecodeError, HotspotModel};
use mapview::map::{MapId, MapRecord, MapSummary, SaveMapRequest, SavedMap};
use tracing::info;
use uuid::Uuid;

use super::store::MapStore;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("map not found: {0}")]
    NotFound(MapId),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidHotspots(#[from] DecodeError),
    #[error("too many hotspots: {count} (max {max})")]
    TooManyHotspots { count: usize, max: usize },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// Outcome of [`save_map`]: the saved id and whether the map is new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: SavedMap,
    pub created: bool,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Create a map when `req.id` is absent, otherwise update it.
///
/// # Errors
///
/// `MissingField` for a blank title or image URL, `InvalidHotspots` when the
/// hotspot JSON does not decode, `TooManyHotspots` above `max_hotspots`, and
/// `NotFound` when updating an unknown id.
pub async fn save_map(store: &dyn MapStore, req: SaveMapRequest, max_hotspots: usize) -> Result<SaveOutcome, MapError> {
    if let Some(field) = req.missing_field() {
        return Err(MapError::MissingField(field));
    }
    let model = HotspotModel::from_json(&req.hotspots)?;
    check_hotspot_count(&model, max_hotspots)?;
    let hotspots = model.to_json()?;
    let now = now_ms();

    let title = req.title.trim().to_owned();
    let image_url = req.image_url.trim().to_owned();
    let count = model.len();

    let (id, created) = match req.id {
        None => {
            let id = Uuid::new_v4();
            store
                .put(MapRecord { id, title, image_url, hotspots, created_at: now, updated_at: now })
                .await;
            (id, true)
        }
        Some(id) => {
            store
                .update(
                    id,
                    Box::new(move |record: &mut MapRecord| {
                        record.title = title;
                        record.image_url = image_url;
                        record.hotspots = hotspots;
                        record.updated_at = now.max(record.updated_at);
                    }),
                )
                .await
                .ok_or(MapError::NotFound(id))?;
            (id, false)
        }
    };

    info!(%id, created, hotspots = count, "map saved");
    Ok(SaveOutcome { saved: SavedMap { id }, created })
}

/// Fetch one map.
///
/// # Errors
///
/// `NotFound` for an unknown id.
pub async fn get_map(store: &dyn MapStore, id: MapId) -> Result<MapRecord, MapError> {
    store.get(id).await.ok_or(MapError::NotFound(id))
}

/// Delete one map.
///
/// # Errors
///
/// `NotFound` for an unknown id.
pub async fn delete_map(store: &dyn MapStore, id: MapId) -> Result<(), MapError> {
    store.remove(id).await.ok_or(MapError::NotFound(id))?;
    info!(%id, "map deleted");
    Ok(())
}

/// Summaries of all maps, newest first.
pub async fn list_maps(store: &dyn MapStore) -> Vec<MapSummary> {
    store.list().await.iter().map(MapRecord::summary).collect()
}

/// CSV export of a map's active hotspots.
///
/// # Errors
///
/// `NotFound` for an unknown id, `InvalidHotspots` for a corrupt stored list,
/// and `Export(NothingToExport)` when no hotspot is active.
pub async fn export_csv(store: &dyn MapStore, id: MapId) -> Result<String, MapError> {
    let record = get_map(store, id).await?;
    let csv = record.hotspot_model()?.to_csv()?;
    Ok(csv)
}

/// Replace a map's hotspots with the rows of a CSV file.
///
/// # Errors
///
/// `NotFound` for an unknown id, `Import` for malformed CSV and
/// `TooManyHotspots` above `max_hotspots`. Nothing is written on error.
pub async fn import_csv(store: &dyn MapStore, id: MapId, text: &str, max_hotspots: usize) -> Result<MapSummary, MapError> {
    let model = HotspotModel::from_csv(text)?;
    check_hotspot_count(&model, max_hotspots)?;
    let hotspots = model.to_json()?;
    let now = now_ms();

    let record = store
        .update(
            id,
            Box::new(move |record: &mut MapRecord| {
                record.hotspots = hotspots;
                record.updated_at = now.max(record.updated_at);
            }),
        )
        .await
        .ok_or(MapError::NotFound(id))?;
    info!(%id, hotspots = model.len(), "hotspots imported");
    Ok(record.summary())
}

// =============================================================================
// HELPERS
// =============================================================================

fn check_hotspot_count(model: &HotspotModel, max: usize) -> Result<(), MapError> {
    if model.len() > max {
        return Err(MapError::TooManyHotspots { count: model.len(), max });
    }
    Ok(())
}

/// Current unix time in milliseconds.
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
