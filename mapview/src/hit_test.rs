use super::*;

fn wrapper() -> Size {
    Size::new(400.0, 200.0)
}

#[test]
fn hit_at_marker_center() {
    let mut model = HotspotModel::new();
    let id = model.add(50.0, 50.0).id;
    let vp = Viewport::default();
    assert_eq!(hotspot_at(Point::new(200.0, 100.0), &vp, wrapper(), &model), Some(id));
}

#[test]
fn hit_accounts_for_viewport() {
    let mut model = HotspotModel::new();
    let id = model.add(25.0, 50.0).id;
    let vp = Viewport { scale: 2.0, offset: Point::new(10.0, -20.0) };
    // marker at (100, 100) image px -> (210, 180) on screen
    assert_eq!(hotspot_at(Point::new(215.0, 185.0), &vp, wrapper(), &model), Some(id));
    assert_eq!(hotspot_at(Point::new(100.0, 100.0), &vp, wrapper(), &model), None);
}

#[test]
fn miss_outside_radius() {
    let mut model = HotspotModel::new();
    model.add(50.0, 50.0);
    let vp = Viewport::default();
    let far = Point::new(200.0 + MARKER_HIT_RADIUS_PX + 1.0, 100.0);
    assert_eq!(hotspot_at(far, &vp, wrapper(), &model), None);
}

#[test]
fn topmost_marker_wins() {
    let mut model = HotspotModel::new();
    model.add(50.0, 50.0);
    let top = model.add(51.0, 50.0).id;
    let vp = Viewport::default();
    assert_eq!(hotspot_at(Point::new(202.0, 100.0), &vp, wrapper(), &model), Some(top));
}

#[test]
fn inactive_markers_are_not_hit() {
    let mut model = HotspotModel::new();
    let id = model.add(50.0, 50.0).id;
    model.set_active(&id, false);
    let vp = Viewport::default();
    assert_eq!(target_at(Point::new(200.0, 100.0), &vp, wrapper(), &model), PointerTarget::Background);
}

#[test]
fn target_reports_hotspot() {
    let mut model = HotspotModel::new();
    let id = model.add(0.0, 0.0).id;
    let vp = Viewport::default();
    assert_eq!(target_at(Point::new(3.0, 3.0), &vp, wrapper(), &model), PointerTarget::Hotspot(id));
}
