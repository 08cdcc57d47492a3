#![allow(clippy::float_cmp)]

use super::*;
use crate::grid::{GridCell, GridRect, grid_to_canvas};

const EPSILON: f64 = 1e-9;

fn snapped(unit: f64) -> SnapRules {
    SnapRules { quantum: Some(unit), min_size: unit, allow_negative: true }
}

fn free(min: f64) -> SnapRules {
    SnapRules { quantum: None, min_size: min, allow_negative: true }
}

fn bounded(unit: f64) -> SnapRules {
    SnapRules { quantum: Some(unit), min_size: unit, allow_negative: false }
}

fn transform(pan_x: f64, pan_y: f64, scale: f64) -> TransformState {
    match TransformState::new(pan_x, pan_y, scale) {
        Ok(t) => t,
        Err(e) => panic!("bad transform in test: {e}"),
    }
}

fn shape_at(kind: ShapeKind, rect: Rect) -> Shape {
    Shape::new(kind, rect, 0)
}

fn rect_approx_eq(a: Rect, b: Rect) -> bool {
    (a.x - b.x).abs() < EPSILON
        && (a.y - b.y).abs() < EPSILON
        && (a.w - b.w).abs() < EPSILON
        && (a.h - b.h).abs() < EPSILON
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_scales_screen_delta_by_zoom() {
    // Start at canvas (200, 160), drag 100px right at 2x zoom.
    let shape = shape_at(ShapeKind::Rect, Rect::new(200.0, 160.0, 80.0, 80.0));
    let session = DragSession::begin(&shape, Point::new(500.0, 400.0), SessionMode::Move);
    let r = session.geometry_at(Point::new(600.0, 400.0), &transform(0.0, 0.0, 2.0), &free(40.0));
    assert_eq!(r.x, 250.0);
    assert_eq!(r.y, 160.0);
}

#[test]
fn move_is_independent_of_pan() {
    let shape = shape_at(ShapeKind::Rect, Rect::new(0.0, 0.0, 80.0, 80.0));
    let session = DragSession::begin(&shape, Point::new(10.0, 10.0), SessionMode::Move);
    let a = session.geometry_at(Point::new(70.0, 30.0), &transform(0.0, 0.0, 1.5), &free(40.0));
    let b = session.geometry_at(Point::new(70.0, 30.0), &transform(-5000.0, 900.0, 1.5), &free(40.0));
    assert_eq!(a, b);
}

#[test]
fn move_snaps_to_quantum() {
    let r = move_geometry(Rect::new(40.0, 40.0, 80.0, 80.0), Point::new(25.0, -21.0), &snapped(40.0));
    assert_eq!(r, Rect::new(80.0, 0.0, 80.0, 80.0));
}

#[test]
fn move_allows_negative_by_default() {
    let r = move_geometry(Rect::new(0.0, 0.0, 80.0, 80.0), Point::new(-100.0, -59.0), &snapped(40.0));
    assert_eq!(r.origin(), Point::new(-120.0, -40.0));
}

#[test]
fn move_clamps_in_bounded_mode() {
    let r = move_geometry(Rect::new(40.0, 40.0, 80.0, 80.0), Point::new(-500.0, -500.0), &bounded(40.0));
    assert_eq!(r.origin(), Point::new(0.0, 0.0));
}

#[test]
fn move_keeps_size() {
    let r = move_geometry(Rect::new(0.0, 0.0, 123.0, 45.0), Point::new(7.0, 9.0), &snapped(40.0));
    assert_eq!((r.w, r.h), (123.0, 45.0));
}

#[test]
fn move_delta_agrees_with_absolute_rederivation() {
    let t = transform(-777.7, 333.3, 1.3333);
    let start_pointer = Point::new(120.0, 80.0);
    let now = Point::new(451.0, -17.0);
    let shape = shape_at(ShapeKind::Rect, Rect::new(-40.0, 80.0, 80.0, 80.0));
    let session = DragSession::begin(&shape, start_pointer, SessionMode::Move);
    let via_delta = session.geometry_at(now, &t, &free(40.0));
    let absolute = t.screen_to_canvas(now).sub(t.screen_to_canvas(start_pointer));
    let expected = Rect::new(-40.0 + absolute.x, 80.0 + absolute.y, 80.0, 80.0);
    assert!(rect_approx_eq(via_delta, expected), "{via_delta:?} vs {expected:?}");
}

// =============================================================
// Resize: rectangles
// =============================================================

#[test]
fn resize_west_past_east_edge_clamps_to_one_unit() {
    let start = Rect::new(200.0, 160.0, 240.0, 160.0);
    let r = resize_geometry(start, ResizeAnchor::W, Point::new(300.0, 0.0), &snapped(40.0), false);
    assert_eq!(r.w, 40.0);
    assert_eq!(r.x, 440.0 - 40.0);
    assert_eq!(r.right(), start.right());
    assert_eq!((r.y, r.h), (160.0, 160.0));
}

#[test]
fn resize_east_grows_width_only() {
    let r = resize_geometry(Rect::new(0.0, 0.0, 80.0, 80.0), ResizeAnchor::E, Point::new(41.0, 500.0), &snapped(40.0), false);
    assert_eq!(r, Rect::new(0.0, 0.0, 120.0, 80.0));
}

#[test]
fn resize_north_pins_bottom() {
    let r = resize_geometry(Rect::new(0.0, 80.0, 80.0, 80.0), ResizeAnchor::N, Point::new(0.0, -40.0), &snapped(40.0), false);
    assert_eq!(r, Rect::new(0.0, 40.0, 80.0, 120.0));
    assert_eq!(r.bottom(), 160.0);
}

#[test]
fn resize_south_shrinks_to_minimum() {
    let r = resize_geometry(Rect::new(0.0, 0.0, 80.0, 160.0), ResizeAnchor::S, Point::new(0.0, -1000.0), &snapped(40.0), false);
    assert_eq!(r, Rect::new(0.0, 0.0, 80.0, 40.0));
}

#[test]
fn resize_nw_pins_bottom_right() {
    let start = Rect::new(80.0, 80.0, 160.0, 160.0);
    let r = resize_geometry(start, ResizeAnchor::Nw, Point::new(-40.0, 40.0), &snapped(40.0), false);
    assert_eq!(r, Rect::new(40.0, 120.0, 200.0, 120.0));
    assert_eq!((r.right(), r.bottom()), (start.right(), start.bottom()));
}

#[test]
fn resize_se_free_mode_is_exact() {
    let r = resize_geometry(Rect::new(0.0, 0.0, 100.0, 100.0), ResizeAnchor::Se, Point::new(12.5, -7.25), &free(40.0), false);
    assert_eq!(r, Rect::new(0.0, 0.0, 112.5, 92.75));
}

#[test]
fn resize_scales_screen_delta_by_zoom() {
    let shape = shape_at(ShapeKind::Rect, Rect::new(0.0, 0.0, 80.0, 80.0));
    let session = DragSession::begin(&shape, Point::new(160.0, 80.0), SessionMode::Resize(ResizeAnchor::E));
    let r = session.geometry_at(Point::new(240.0, 80.0), &transform(0.0, 0.0, 2.0), &snapped(40.0));
    assert_eq!(r.w, 120.0);
}

#[test]
fn minimum_size_holds_for_every_anchor() {
    let start = Rect::new(-200.0, 120.0, 240.0, 160.0);
    let pushes = [
        Point::new(10_000.0, 10_000.0),
        Point::new(-10_000.0, -10_000.0),
        Point::new(10_000.0, -10_000.0),
        Point::new(-10_000.0, 10_000.0),
    ];
    for anchor in ResizeAnchor::ALL {
        for delta in pushes {
            for uniform in [false, true] {
                for rules in [snapped(40.0), free(40.0), bounded(40.0)] {
                    let r = resize_geometry(start, anchor, delta, &rules, uniform);
                    assert!(r.w >= 40.0 && r.h >= 40.0, "{anchor:?} {delta:?} uniform={uniform} -> {r:?}");
                }
            }
        }
    }
}

#[test]
fn shrinking_never_moves_pinned_edges() {
    let start = Rect::new(200.0, 160.0, 240.0, 160.0);
    for anchor in ResizeAnchor::ALL {
        let inward = Point::new(
            if anchor.moves_left() { 1000.0 } else { -1000.0 },
            if anchor.moves_top() { 1000.0 } else { -1000.0 },
        );
        let r = resize_geometry(start, anchor, inward, &snapped(40.0), false);
        if anchor.moves_left() {
            assert_eq!(r.right(), start.right(), "{anchor:?}");
        } else {
            assert_eq!(r.x, start.x, "{anchor:?}");
        }
        if anchor.moves_top() {
            assert_eq!(r.bottom(), start.bottom(), "{anchor:?}");
        } else {
            assert_eq!(r.y, start.y, "{anchor:?}");
        }
    }
}

#[test]
fn bounded_resize_stops_left_edge_at_zero() {
    let r = resize_geometry(Rect::new(40.0, 40.0, 80.0, 80.0), ResizeAnchor::Nw, Point::new(-400.0, -400.0), &bounded(40.0), false);
    assert_eq!(r, Rect::new(0.0, 0.0, 120.0, 120.0));
}

// =============================================================
// Resize: circles
// =============================================================

#[test]
fn circle_corner_uses_larger_candidate() {
    let r = resize_geometry(Rect::new(0.0, 0.0, 80.0, 80.0), ResizeAnchor::Se, Point::new(40.0, 120.0), &snapped(40.0), true);
    assert_eq!(r, Rect::new(0.0, 0.0, 200.0, 200.0));
}

#[test]
fn circle_nw_pins_bottom_right() {
    let start = Rect::new(80.0, 80.0, 80.0, 80.0);
    let r = resize_geometry(start, ResizeAnchor::Nw, Point::new(-80.0, -40.0), &snapped(40.0), true);
    assert_eq!(r.w, r.h);
    assert_eq!(r.w, 160.0);
    assert_eq!((r.right(), r.bottom()), (160.0, 160.0));
}

#[test]
fn circle_ne_pins_bottom_left() {
    let start = Rect::new(0.0, 0.0, 80.0, 80.0);
    let r = resize_geometry(start, ResizeAnchor::Ne, Point::new(80.0, 0.0), &snapped(40.0), true);
    assert_eq!(r, Rect::new(0.0, -80.0, 160.0, 160.0));
}

#[test]
fn circle_edge_drives_both_dimensions() {
    let r = resize_geometry(Rect::new(0.0, 0.0, 80.0, 80.0), ResizeAnchor::E, Point::new(40.0, 0.0), &snapped(40.0), true);
    assert_eq!(r, Rect::new(0.0, 0.0, 120.0, 120.0));
    let r = resize_geometry(Rect::new(0.0, 80.0, 80.0, 80.0), ResizeAnchor::N, Point::new(0.0, -40.0), &snapped(40.0), true);
    assert_eq!(r, Rect::new(0.0, 40.0, 120.0, 120.0));
}

#[test]
fn circle_stays_square_for_every_anchor_and_delta() {
    let start = Rect::new(-80.0, 40.0, 160.0, 160.0);
    for anchor in ResizeAnchor::ALL {
        for (dx, dy) in [(37.0, -91.0), (-250.0, 13.0), (500.0, 500.0), (-3.0, -3.0)] {
            let session = DragSession {
                shape_id: uuid::Uuid::new_v4(),
                kind: ShapeKind::Circle,
                start_pointer: Point::new(0.0, 0.0),
                start,
                mode: SessionMode::Resize(anchor),
            };
            for rules in [snapped(40.0), bounded(40.0)] {
                let r = session.geometry_at(Point::new(dx, dy), &TransformState::IDENTITY, &rules);
                assert_eq!(r.w, r.h, "{anchor:?} ({dx}, {dy}) {rules:?} -> {r:?}");
                assert_eq!(r.w % 40.0, 0.0, "{anchor:?} ({dx}, {dy}) {rules:?} -> {r:?}");
            }
        }
    }
}

#[test]
fn bounded_circle_near_origin_stays_square_on_grid() {
    // Right edge 90 and bottom edge 130 differ; the tighter one caps the side.
    let start = Rect::new(10.0, 50.0, 80.0, 80.0);
    let r = resize_geometry(start, ResizeAnchor::Nw, Point::new(-200.0, -5.0), &bounded(40.0), true);
    assert_eq!(r.w, r.h);
    assert_eq!(r, Rect::new(0.0, 40.0, 80.0, 80.0));
    assert!(r.x >= 0.0 && r.y >= 0.0);
}

#[test]
fn bounded_circle_sweep_keeps_origin_non_negative() {
    let start = Rect::new(40.0, 120.0, 80.0, 80.0);
    for anchor in ResizeAnchor::ALL {
        for (dx, dy) in [(-500.0, -20.0), (-20.0, -500.0), (-1000.0, -1000.0), (300.0, 300.0)] {
            let r = resize_geometry(start, anchor, Point::new(dx, dy), &bounded(40.0), true);
            assert_eq!(r.w, r.h, "{anchor:?} ({dx}, {dy}) -> {r:?}");
            assert!(r.x >= 0.0 && r.y >= 0.0, "{anchor:?} ({dx}, {dy}) -> {r:?}");
            assert!(r.w >= 40.0, "{anchor:?} ({dx}, {dy}) -> {r:?}");
        }
    }
}

// =============================================================
// Resize: off-grid starts
// =============================================================

#[test]
fn west_resize_from_off_grid_start_lands_on_grid() {
    let start = Rect::new(10.0, 0.0, 100.0, 80.0);
    let r = resize_geometry(start, ResizeAnchor::W, Point::new(-5.0, 0.0), &snapped(40.0), false);
    assert_eq!(r.x % 40.0, 0.0);
    assert_eq!(r.w % 40.0, 0.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 120.0, 80.0));
    let cells = GridRect::nearest(r, 40.0);
    assert_eq!(grid_to_canvas(GridCell::new(cells.x, cells.y), 40.0), r.origin());
    assert_eq!((cells.w, cells.h), (3, 2));
}

#[test]
fn north_resize_from_off_grid_start_lands_on_grid() {
    let start = Rect::new(0.0, 13.0, 80.0, 77.0);
    for dy in [-61.0, -7.0, 0.5, 22.0, 500.0] {
        let r = resize_geometry(start, ResizeAnchor::N, Point::new(0.0, dy), &snapped(40.0), false);
        assert_eq!(r.y % 40.0, 0.0, "dy {dy} -> {r:?}");
        assert_eq!(r.h % 40.0, 0.0, "dy {dy} -> {r:?}");
        assert!(r.h >= 40.0, "dy {dy} -> {r:?}");
    }
}
