use mapview::map::{MapId, SaveMapRequest};

use super::*;
use crate::services::maps;

/// Create a test `AppState` over an empty in-memory store.
#[must_use]
pub fn test_app_state() -> AppState {
    AppState::in_memory(&ServerConfig::default())
}

/// Create a test `AppState` with a custom hotspot limit.
#[must_use]
pub fn test_app_state_with_limit(max_hotspots: usize) -> AppState {
    AppState::new(Arc::new(InMemoryMapStore::new()), max_hotspots)
}

/// Seed a map with the given hotspot JSON and return its ID.
pub async fn seed_map(state: &AppState, hotspots: &str) -> MapId {
    let req = SaveMapRequest {
        id: None,
        title: "Campus".into(),
        image_url: "https://example.com/campus.png".into(),
        hotspots: hotspots.into(),
    };
    maps::save_map(state.store.as_ref(), req, state.max_hotspots)
        .await
        .expect("seed map should save")
        .saved
        .id
}
