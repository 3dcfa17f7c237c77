//! Map record storage.
//!
//! DESIGN
//! ======
//! Handlers and services only see the `MapStore` trait. The shipped
//! implementation keeps records in process memory behind a tokio `RwLock`;
//! records are lost on restart. Stores do no validation: everything they
//! receive has already been normalized by the map service.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use mapview::map::{MapId, MapRecord};
use tokio::sync::RwLock;

/// Edit applied to a stored record while the store holds it locked.
pub type RecordEdit = Box<dyn FnOnce(&mut MapRecord) + Send>;

#[async_trait::async_trait]
pub trait MapStore: Send + Sync {
    /// Fetch one record.
    async fn get(&self, id: MapId) -> Option<MapRecord>;

    /// Insert or overwrite the record with `record.id`.
    async fn put(&self, record: MapRecord);

    /// Apply `edit` to an existing record atomically, returning the result.
    /// `None` when the id is unknown; a missing record is never recreated.
    async fn update(&self, id: MapId, edit: RecordEdit) -> Option<MapRecord>;

    /// Remove a record, returning it if it existed.
    async fn remove(&self, id: MapId) -> Option<MapRecord>;

    /// All records, newest first by creation time.
    async fn list(&self) -> Vec<MapRecord>;
}

#[derive(Default)]
pub struct InMemoryMapStore {
    maps: RwLock<HashMap<MapId, MapRecord>>,
}

impl InMemoryMapStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MapStore for InMemoryMapStore {
    async fn get(&self, id: MapId) -> Option<MapRecord> {
        self.maps.read().await.get(&id).cloned()
    }

    async fn put(&self, record: MapRecord) {
        self.maps.write().await.insert(record.id, record);
    }

    async fn update(&self, id: MapId, edit: RecordEdit) -> Option<MapRecord> {
        let mut maps = self.maps.write().await;
        let record = maps.get_mut(&id)?;
        edit(record);
        Some(record.clone())
    }

    async fn remove(&self, id: MapId) -> Option<MapRecord> {
        self.maps.write().await.remove(&id)
    }

    async fn list(&self) -> Vec<MapRecord> {
        let mut records: Vec<MapRecord> = self.maps.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        records
    }
}
