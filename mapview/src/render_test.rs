use super::*;
use crate::hotspot::HotspotPatch;
use crate::viewport::Point;

#[test]
fn transform_translates_then_scales() {
    let vp = Viewport { scale: 1.5, offset: Point::new(-400.0, 12.5) };
    assert_eq!(transform_css(&vp), "translate(-400px, 12.5px) scale(1.5)");
}

#[test]
fn transform_of_identity() {
    assert_eq!(transform_css(&Viewport::default()), "translate(0px, 0px) scale(1)");
}

#[test]
fn zoom_label_rounds_percent() {
    assert_eq!(zoom_label(1.0), "100%");
    assert_eq!(zoom_label(1.234), "123%");
    assert_eq!(zoom_label(4.999), "500%");
}

#[test]
fn scene_numbers_only_active_markers() {
    let mut model = HotspotModel::new();
    let a = model.add(10.0, 10.0).id;
    let b = model.add(20.0, 20.0).id;
    let c = model.add(30.0, 30.0).id;
    model.set_active(&b, false);

    let scene = scene(&Viewport::default(), &model);
    let numbered: Vec<(&str, usize)> = scene.markers.iter().map(|m| (m.id.as_str(), m.number)).collect();
    assert_eq!(numbered, vec![(a.as_str(), 1), (c.as_str(), 2)]);
}

#[test]
fn marker_position_ignores_viewport() {
    let mut model = HotspotModel::new();
    model.add(12.5, 87.5);
    let zoomed = Viewport { scale: 3.0, offset: Point::new(-250.0, 40.0) };
    let scene = scene(&zoomed, &model);
    assert_eq!(scene.markers[0].left_pct, 12.5);
    assert_eq!(scene.markers[0].top_pct, 87.5);
    assert_eq!(scene.zoom_label, "300%");
}

#[test]
fn marker_url_only_when_clickable() {
    let mut model = HotspotModel::new();
    let a = model.add(1.0, 1.0).id;
    model.add(2.0, 2.0);
    model.update(&a, &HotspotPatch { url: Some("https://example.com".into()), ..Default::default() });
    let scene = scene(&Viewport::default(), &model);
    assert_eq!(scene.markers[0].url.as_deref(), Some("https://example.com"));
    assert_eq!(scene.markers[1].url, None);
}

#[test]
fn scene_serializes_for_host() {
    let mut model = HotspotModel::new();
    model.add(5.0, 6.0);
    let value = serde_json::to_value(scene(&Viewport::default(), &model)).unwrap();
    assert_eq!(value["markers"][0]["number"], 1);
    assert_eq!(value["transform"], "translate(0px, 0px) scale(1)");
}
