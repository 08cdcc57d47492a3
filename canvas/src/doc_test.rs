#![allow(clippy::float_cmp)]

use super::*;

fn make_shape(kind: ShapeKind, z: i64) -> Shape {
    Shape::new(kind, Rect::new(0.0, 0.0, 80.0, 80.0), z)
}

// --- ShapeKind ---

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ShapeKind::Rect).unwrap_or_default(), "\"rect\"");
    assert_eq!(serde_json::to_string(&ShapeKind::Circle).unwrap_or_default(), "\"circle\"");
}

#[test]
fn kind_from_str() {
    assert_eq!("rect".parse::<ShapeKind>().ok(), Some(ShapeKind::Rect));
    assert_eq!("circle".parse::<ShapeKind>().ok(), Some(ShapeKind::Circle));
    assert!(matches!("hexagon".parse::<ShapeKind>(), Err(CanvasError::UnknownShapeKind(k)) if k == "hexagon"));
}

#[test]
fn kind_display_matches_wire_name() {
    assert_eq!(ShapeKind::Circle.to_string(), "circle");
}

#[test]
fn only_circle_is_uniform() {
    assert!(ShapeKind::Circle.is_uniform());
    assert!(!ShapeKind::Rect.is_uniform());
}

// --- Shape ---

#[test]
fn new_shape_has_default_style() {
    let s = make_shape(ShapeKind::Rect, 0);
    assert_eq!(s.style.fill, "#FFFFFF");
    assert_eq!(s.style.stroke, "#555555");
    assert_eq!(s.style.stroke_width, 2.0);
    assert_eq!(s.style.opacity, 1.0);
    assert_eq!(s.label, "Rectangle");
}

#[test]
fn new_shapes_get_distinct_ids() {
    assert_ne!(make_shape(ShapeKind::Rect, 0).id, make_shape(ShapeKind::Rect, 0).id);
}

#[test]
fn shape_deserializes_without_label_or_style() {
    let json = serde_json::json!({
        "id": "6f1c2d1e-2b7c-4d0e-9b9a-1c2d3e4f5a6b",
        "kind": "circle",
        "x": -40.0, "y": 80.0, "w": 80.0, "h": 80.0, "z": 3
    });
    let Ok(shape) = serde_json::from_value::<Shape>(json) else {
        panic!("shape should parse");
    };
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!(shape.rect(), Rect::new(-40.0, 80.0, 80.0, 80.0));
    assert_eq!(shape.label, "");
    assert_eq!(shape.style, Style::default());
}

// --- GeometryUpdate ---

#[test]
fn geometry_update_with_cells() {
    let id = Uuid::new_v4();
    let update = GeometryUpdate::new(id, Rect::new(-80.0, 40.0, 120.0, 80.0), Some(40.0));
    assert_eq!(update.cells, Some(GridRect { x: -2, y: 1, w: 3, h: 2 }));
}

#[test]
fn geometry_update_omits_cells_when_free() {
    let update = GeometryUpdate::new(Uuid::new_v4(), Rect::new(1.5, 2.5, 30.0, 40.0), None);
    let json = serde_json::to_value(update).unwrap_or_default();
    assert!(json.get("cells").is_none());
    assert_eq!(json["x"], 1.5);
}

// --- DocStore basics ---

#[test]
fn store_new_is_empty() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.max_z(), None);
    assert_eq!(store.next_z(), 0);
}

#[test]
fn store_insert_get_remove() {
    let mut store = DocStore::new();
    let s = make_shape(ShapeKind::Rect, 0);
    let id = s.id;
    store.insert(s);
    assert!(store.contains(&id));
    assert_eq!(store.get(&id).map(|s| s.kind), Some(ShapeKind::Rect));
    assert!(store.remove(&id).is_some());
    assert!(store.get(&id).is_none());
    assert!(store.remove(&id).is_none());
}

#[test]
fn store_apply_geometry() {
    let mut store = DocStore::new();
    let s = make_shape(ShapeKind::Rect, 0);
    let id = s.id;
    store.insert(s);
    let update = GeometryUpdate::new(id, Rect::new(40.0, -40.0, 120.0, 80.0), None);
    assert!(store.apply_geometry(&update));
    assert_eq!(store.get(&id).map(Shape::rect), Some(Rect::new(40.0, -40.0, 120.0, 80.0)));
}

#[test]
fn store_apply_geometry_missing_shape() {
    let mut store = DocStore::new();
    let update = GeometryUpdate::new(Uuid::new_v4(), Rect::new(0.0, 0.0, 40.0, 40.0), None);
    assert!(!store.apply_geometry(&update));
    assert!(store.is_empty());
}

#[test]
fn store_load_snapshot_replaces() {
    let mut store = DocStore::new();
    store.insert(make_shape(ShapeKind::Rect, 0));
    store.load_snapshot(vec![make_shape(ShapeKind::Circle, 1), make_shape(ShapeKind::Circle, 2)]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.max_z(), Some(2));
}

#[test]
fn store_load_snapshot_skips_malformed_geometry() {
    let mut store = DocStore::new();
    let good = make_shape(ShapeKind::Rect, 0);
    let good_id = good.id;
    let bad = [
        Rect::new(0.0, 0.0, 0.0, 80.0),
        Rect::new(0.0, 0.0, 80.0, -40.0),
        Rect::new(f64::NAN, 0.0, 80.0, 80.0),
        Rect::new(0.0, 0.0, f64::INFINITY, 80.0),
    ];
    let mut shapes = vec![good];
    shapes.extend(bad.into_iter().map(|r| Shape::new(ShapeKind::Circle, r, 1)));
    assert_eq!(store.load_snapshot(shapes), 4);
    assert_eq!(store.len(), 1);
    assert!(store.contains(&good_id));
    assert!(store.sorted_shapes().iter().all(|s| s.w > 0.0 && s.h > 0.0));
}

#[test]
fn store_insert_refuses_empty_shape() {
    let mut store = DocStore::new();
    assert!(!store.insert(Shape::new(ShapeKind::Rect, Rect::new(0.0, 0.0, 80.0, 0.0), 0)));
    assert!(store.is_empty());
}

#[test]
fn store_apply_geometry_refuses_malformed_update() {
    let mut store = DocStore::new();
    let s = make_shape(ShapeKind::Rect, 0);
    let id = s.id;
    store.insert(s);
    let update = GeometryUpdate::new(id, Rect::new(0.0, 0.0, -40.0, f64::NAN), None);
    assert!(!store.apply_geometry(&update));
    assert_eq!(store.get(&id).map(Shape::rect), Some(Rect::new(0.0, 0.0, 80.0, 80.0)));
}

#[test]
fn sorted_shapes_by_z() {
    let mut store = DocStore::new();
    store.insert(make_shape(ShapeKind::Rect, 5));
    store.insert(make_shape(ShapeKind::Rect, -1));
    store.insert(make_shape(ShapeKind::Rect, 2));
    let zs: Vec<i64> = store.sorted_shapes().iter().map(|s| s.z).collect();
    assert_eq!(zs, vec![-1, 2, 5]);
}

// --- Z-order ---

#[test]
fn raise_assigns_max_plus_one() {
    let mut store = DocStore::new();
    let low = make_shape(ShapeKind::Rect, 1);
    let low_id = low.id;
    store.insert(low);
    store.insert(make_shape(ShapeKind::Rect, 4));
    store.insert(make_shape(ShapeKind::Rect, 9));
    assert_eq!(store.raise_to_front(&low_id), Some(10));
    assert_eq!(store.get(&low_id).map(|s| s.z), Some(10));
}

#[test]
fn raise_breaks_tie_with_equal_top() {
    let mut store = DocStore::new();
    let a = make_shape(ShapeKind::Rect, 3);
    let a_id = a.id;
    store.insert(a);
    store.insert(make_shape(ShapeKind::Rect, 3));
    assert_eq!(store.raise_to_front(&a_id), Some(4));
}

#[test]
fn raise_top_shape_is_noop() {
    let mut store = DocStore::new();
    let top = make_shape(ShapeKind::Rect, 7);
    let top_id = top.id;
    store.insert(top);
    store.insert(make_shape(ShapeKind::Rect, 2));
    assert_eq!(store.raise_to_front(&top_id), None);
    assert_eq!(store.get(&top_id).map(|s| s.z), Some(7));
}

#[test]
fn raise_missing_shape_is_none() {
    let mut store = DocStore::new();
    assert_eq!(store.raise_to_front(&Uuid::new_v4()), None);
}

#[test]
fn raised_z_exceeds_every_other_z() {
    let mut store = DocStore::new();
    let mut ids = Vec::new();
    for z in [0, 3, 3, -2, 8, 8, 1] {
        let s = make_shape(ShapeKind::Circle, z);
        ids.push(s.id);
        store.insert(s);
    }
    for id in ids.iter().chain(ids.iter().rev()) {
        store.raise_to_front(id);
        let z = store.get(id).map_or(i64::MIN, |s| s.z);
        assert!(store.sorted_shapes().iter().filter(|s| s.id != *id).all(|s| s.z < z));
    }
}
