#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn norm_approx_eq(a: NormalizedPoint, b: NormalizedPoint) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn container() -> Rect {
    Rect::new(30.0, 120.0, 800.0, 600.0)
}

fn zoomed() -> Viewport {
    Viewport { scale: 2.5, offset: Point::new(-140.0, 35.0) }
}

// --- Rect ---

#[test]
fn rect_to_local_subtracts_origin() {
    assert_eq!(container().to_local(Point::new(50.0, 150.0)), Point::new(20.0, 30.0));
}

// --- screen_to_normalized ---

#[test]
fn screen_to_normalized_identity_viewport() {
    let vp = Viewport::default();
    let wrapper = Size::new(800.0, 600.0);
    let n = screen_to_normalized(Point::new(430.0, 420.0), container(), &vp, wrapper);
    assert!(norm_approx_eq(n, NormalizedPoint::new(50.0, 50.0)));
}

#[test]
fn screen_to_normalized_removes_offset_and_scale() {
    let vp = Viewport { scale: 2.0, offset: Point::new(100.0, 50.0) };
    let wrapper = Size::new(400.0, 200.0);
    // local (500, 250) -> image ((500-100)/2, (250-50)/2) = (200, 100) -> (50%, 50%)
    let page = Point::new(530.0, 370.0);
    let n = screen_to_normalized(page, container(), &vp, wrapper);
    assert!(norm_approx_eq(n, NormalizedPoint::new(50.0, 50.0)));
}

#[test]
fn click_beside_image_is_outside() {
    let vp = Viewport { scale: 1.0, offset: Point::new(200.0, 0.0) };
    let wrapper = Size::new(400.0, 600.0);
    let n = screen_to_normalized(Point::new(40.0, 200.0), container(), &vp, wrapper);
    assert!(n.x < 0.0);
    assert!(!n.is_within_image());
}

#[test]
fn edges_are_within_image() {
    assert!(NormalizedPoint::new(0.0, 0.0).is_within_image());
    assert!(NormalizedPoint::new(100.0, 100.0).is_within_image());
    assert!(!NormalizedPoint::new(100.01, 50.0).is_within_image());
    assert!(!NormalizedPoint::new(50.0, -0.01).is_within_image());
}

#[test]
fn degenerate_wrapper_maps_to_origin() {
    let n = screen_to_normalized(Point::new(10.0, 10.0), container(), &zoomed(), Size::new(0.0, 0.0));
    assert_eq!(n, NormalizedPoint::default());
}

// --- normalized_to_screen ---

#[test]
fn normalized_to_screen_is_relative_to_wrapper() {
    let p = normalized_to_screen(NormalizedPoint::new(25.0, 75.0), Size::new(800.0, 400.0));
    assert_eq!(p, Point::new(200.0, 300.0));
}

#[test]
fn round_trip_over_sampled_points() {
    let wrapper = Size::new(1600.0, 900.0);
    let vp = zoomed();
    let rect = container();
    let samples = [
        (0.0, 0.0),
        (100.0, 0.0),
        (0.0, 100.0),
        (100.0, 100.0),
        (50.0, 50.0),
        (12.5, 87.5),
        (33.3, 66.6),
        (99.9, 0.1),
        (1.0, 42.0),
        (75.25, 24.75),
        (60.0, 10.0),
    ];
    for (x, y) in samples {
        let n = NormalizedPoint::new(x, y);
        let local = normalized_to_container(n, &vp, wrapper);
        let page = Point::new(local.x + rect.left, local.y + rect.top);
        let back = screen_to_normalized(page, rect, &vp, wrapper);
        assert!(norm_approx_eq(back, n), "({x}, {y}) came back as {back:?}");
    }
}

// --- deltas / clamping ---

#[test]
fn screen_delta_accounts_for_scale() {
    let vp = Viewport { scale: 2.0, offset: Point::new(999.0, -999.0) };
    let d = screen_delta_to_normalized(Point::new(40.0, -20.0), &vp, Size::new(200.0, 100.0));
    // 40/2 = 20px of 200 = 10%, -20/2 = -10px of 100 = -10%
    assert!(norm_approx_eq(d, NormalizedPoint::new(10.0, -10.0)));
}

#[test]
fn clamp_percent_bounds() {
    assert_eq!(clamp_percent(-5.0), 0.0);
    assert_eq!(clamp_percent(105.0), 100.0);
    assert_eq!(clamp_percent(42.0), 42.0);
    assert_eq!(clamp_percent(f64::NAN), 0.0);
    assert!(clamp_percent(-0.0).is_sign_positive());
}

#[test]
fn clamped_point_stays_on_image() {
    let p = NormalizedPoint::new(-3.0, 140.0).clamped();
    assert_eq!(p, NormalizedPoint::new(0.0, 100.0));
}
