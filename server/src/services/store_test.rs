use uuid::Uuid;

use super::*;

fn record(created_at: i64) -> MapRecord {
    MapRecord {
        id: Uuid::new_v4(),
        title: format!("map {created_at}"),
        image_url: "https://example.com/a.png".into(),
        hotspots: "[]".into(),
        created_at,
        updated_at: created_at,
    }
}

#[tokio::test]
async fn put_then_get() {
    let store = InMemoryMapStore::new();
    let rec = record(1);
    store.put(rec.clone()).await;
    assert_eq!(store.get(rec.id).await, Some(rec));
}

#[tokio::test]
async fn get_unknown_is_none() {
    let store = InMemoryMapStore::new();
    assert!(store.get(Uuid::new_v4()).await.is_none());
}

#[tokio::test]
async fn put_overwrites() {
    let store = InMemoryMapStore::new();
    let mut rec = record(1);
    store.put(rec.clone()).await;
    rec.title = "renamed".into();
    store.put(rec.clone()).await;
    assert_eq!(store.get(rec.id).await.unwrap().title, "renamed");
    assert_eq!(store.list().await.len(), 1);
}

#[tokio::test]
async fn remove_returns_record_once() {
    let store = InMemoryMapStore::new();
    let rec = record(1);
    store.put(rec.clone()).await;
    assert_eq!(store.remove(rec.id).await, Some(rec.clone()));
    assert!(store.remove(rec.id).await.is_none());
}

#[tokio::test]
async fn list_is_newest_first() {
    let store = InMemoryMapStore::new();
    for created_at in [20, 10, 30] {
        store.put(record(created_at)).await;
    }
    let order: Vec<i64> = store.list().await.iter().map(|r| r.created_at).collect();
    assert_eq!(order, vec![30, 20, 10]);
}

#[tokio::test]
async fn update_edits_existing_record() {
    let store = InMemoryMapStore::new();
    let rec = record(1);
    store.put(rec.clone()).await;

    let updated = store.update(rec.id, Box::new(|r: &mut MapRecord| r.title = "renamed".into())).await.unwrap();
    assert_eq!(updated.title, "renamed");
    assert_eq!(store.get(rec.id).await.unwrap().title, "renamed");
}

#[tokio::test]
async fn update_unknown_does_not_insert() {
    let store = InMemoryMapStore::new();
    let rec = record(1);
    store.put(rec.clone()).await;
    store.remove(rec.id).await;

    assert!(store.update(rec.id, Box::new(|r: &mut MapRecord| r.title = "ghost".into())).await.is_none());
    assert!(store.get(rec.id).await.is_none());
    assert!(store.list().await.is_empty());
}
