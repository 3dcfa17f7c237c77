//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once in `main` and injected into Axum handlers via the
//! `State` extractor. It holds the map store behind a trait object, so tests
//! and alternative backends can swap it without touching handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::store::{InMemoryMapStore, MapStore};

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MapStore>,
    /// Maximum hotspots accepted per map.
    pub max_hotspots: usize,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn MapStore>, max_hotspots: usize) -> Self {
        Self { store, max_hotspots }
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(config: &ServerConfig) -> Self {
        Self::new(Arc::new(InMemoryMapStore::new()), config.max_hotspots)
    }
}
