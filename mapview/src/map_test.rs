use serde_json::json;

use super::*;

fn record(hotspots: &str) -> MapRecord {
    MapRecord {
        id: Uuid::nil(),
        title: "Campus".into(),
        image_url: "https://example.com/campus.png".into(),
        hotspots: hotspots.into(),
        created_at: 1,
        updated_at: 2,
    }
}

#[test]
fn save_request_without_id_omits_it() {
    let req = SaveMapRequest { id: None, title: "t".into(), image_url: "u".into(), hotspots: "[]".into() };
    let value = serde_json::to_value(&req).unwrap();
    assert!(value.get("id").is_none());
}

#[test]
fn save_request_hotspots_default_to_empty() {
    let req: SaveMapRequest = serde_json::from_value(json!({ "title": "t", "image_url": "u" })).unwrap();
    assert!(req.hotspots.is_empty());
    assert!(req.id.is_none());
}

#[test]
fn missing_field_checks_title_then_image() {
    let mut req = SaveMapRequest { id: None, title: " ".into(), image_url: String::new(), hotspots: String::new() };
    assert_eq!(req.missing_field(), Some("title"));
    req.title = "Campus".into();
    assert_eq!(req.missing_field(), Some("image_url"));
    req.image_url = "https://example.com/a.png".into();
    assert_eq!(req.missing_field(), None);
}

#[test]
fn summary_counts_hotspots() {
    let rec = record(r#"[{"x":1,"y":2},{"x":3,"y":4,"active":false}]"#);
    let summary = rec.summary();
    assert_eq!(summary.hotspot_count, 2);
    assert_eq!(summary.title, "Campus");
    assert_eq!(summary.updated_at, 2);
}

#[test]
fn summary_tolerates_corrupt_hotspots() {
    assert_eq!(record("not json").summary().hotspot_count, 0);
}
