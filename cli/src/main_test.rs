use super::*;

fn transform(pan_x: f64, pan_y: f64, scale: f64) -> TransformState {
    TransformState::new(pan_x, pan_y, scale).unwrap()
}

#[test]
fn project_block_matches_drop_placement() {
    let config = BoardConfig::default();
    let value = project(&config, &TransformState::IDENTITY, Point::new(75.0, 85.0), Space::Screen);
    assert_eq!(value["block"], json!({ "x": 0, "y": 1 }));
    assert_eq!(value["drop"]["canvas"], json!({ "x": 0.0, "y": 80.0, "w": 80.0, "h": 80.0 }));
    assert_eq!(value["cell"], json!({ "x": 1, "y": 2 }));
}

#[test]
fn project_from_canvas_converts_to_screen() {
    let config = BoardConfig::default();
    let value = project(&config, &transform(0.0, 0.0, 2.0), Point::new(200.0, 200.0), Space::Canvas);
    assert_eq!(value["screen"], json!({ "x": 400.0, "y": 400.0 }));
    assert_eq!(value["block"], json!({ "x": 2, "y": 2 }));
}

#[test]
fn project_without_snap_has_no_block() {
    let config = BoardConfig { snap_to_grid: false, ..Default::default() };
    let value = project(&config, &TransformState::IDENTITY, Point::new(75.0, 85.0), Space::Screen);
    assert!(value["block"].is_null());
    assert_eq!(value["drop"]["canvas"]["x"], 35.0);
}
