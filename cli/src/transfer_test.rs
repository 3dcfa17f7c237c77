#![allow(clippy::float_cmp)]

use mapview::csv::ImportError;
use uuid::Uuid;

use super::*;

fn record() -> MapRecord {
    MapRecord {
        id: Uuid::new_v4(),
        title: "Campus".into(),
        image_url: "https://example.com/campus.png".into(),
        hotspots: r#"[{"x":1,"y":1}]"#.into(),
        created_at: 1,
        updated_at: 2,
    }
}

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mappinner-cli-{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn save_request_without_file_has_empty_list() {
    let req = save_request(None, "Campus".into(), "u".into(), None, None).unwrap();
    assert_eq!(req.hotspots, "[]");
    assert!(req.id.is_none());
}

#[test]
fn save_request_normalizes_file() {
    let path = scratch_file("hotspots.json", r#"[{"x":120,"y":5,"blogUrl":"https://example.com"}]"#);
    let id = Uuid::new_v4();
    let req = save_request(Some(id), "Campus".into(), "u".into(), Some(&path), None).unwrap();
    assert_eq!(req.id, Some(id));

    let model = HotspotModel::from_json(&req.hotspots).unwrap();
    assert_eq!(model.hotspots()[0].x, 100.0);
    assert_eq!(model.hotspots()[0].url, "https://example.com");
}

#[test]
fn update_without_file_keeps_stored_hotspots() {
    let rec = record();
    let req = save_request(Some(rec.id), "Renamed".into(), rec.image_url.clone(), None, Some(&rec)).unwrap();
    assert_eq!(req.id, Some(rec.id));
    assert_eq!(req.title, "Renamed");
    assert_eq!(req.hotspots, rec.hotspots);
}

#[test]
fn file_overrides_stored_hotspots() {
    let rec = record();
    let path = scratch_file("hotspots.json", r#"[{"x":3,"y":4},{"x":5,"y":6}]"#);
    let req = save_request(Some(rec.id), "Campus".into(), "u".into(), Some(&path), Some(&rec)).unwrap();
    assert_eq!(HotspotModel::from_json(&req.hotspots).unwrap().len(), 2);
}

#[test]
fn save_request_rejects_invalid_json_file() {
    let path = scratch_file("hotspots.json", "{oops");
    let err = save_request(None, "Campus".into(), "u".into(), Some(&path), None).unwrap_err();
    assert!(matches!(err, CliError::Decode(_)));
}

#[test]
fn save_request_reports_missing_file() {
    let err = save_request(None, "t".into(), "u".into(), Some(Path::new("/nonexistent/hotspots.json")), None).unwrap_err();
    assert!(matches!(err, CliError::Io(_)));
}

#[test]
fn import_request_keeps_map_and_replaces_hotspots() {
    let rec = record();
    let req = import_request(&rec, "x,y,title,color\n10,20,Gate,#FF0000\n").unwrap();
    assert_eq!(req.id, Some(rec.id));
    assert_eq!(req.title, "Campus");
    assert_eq!(req.image_url, rec.image_url);

    let model = HotspotModel::from_json(&req.hotspots).unwrap();
    assert_eq!(model.len(), 1);
    assert_eq!(model.hotspots()[0].title, "Gate");
    assert_eq!(model.hotspots()[0].color, "#ff0000");
}

#[test]
fn import_request_fails_without_required_columns() {
    let err = import_request(&record(), "title\nGate\n").unwrap_err();
    assert!(matches!(err, CliError::Import(ImportError::MissingColumns(_))));
}

#[test]
fn export_path_uses_timestamped_name() {
    let path = export_path(Path::new("/tmp/out"), 1_700_000_000_000);
    assert_eq!(path, PathBuf::from("/tmp/out/hotspots_1700000000000.csv"));
}
