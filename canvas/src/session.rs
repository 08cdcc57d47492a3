//! Move/resize session geometry.
//!
//! A [`DragSession`] snapshots a shape and the pointer at pointer-down. Every
//! later geometry is a pure function of that snapshot, the current pointer
//! and the current transform, so the preview shown on the last move and the
//! geometry committed on pointer-up are computed by the same call.
//!
//! Pointer travel is turned into canvas travel with
//! [`TransformState::screen_delta_to_canvas`]. Pan cancels out of a screen
//! delta, so a pan that lands mid-gesture cannot drag the shape with it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, TransformState};
use crate::doc::{Shape, ShapeId, ShapeKind};
use crate::hit::ResizeAnchor;
use crate::snap::SnapRules;

/// What a session does with pointer travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "anchor", rename_all = "lowercase")]
pub enum SessionMode {
    Move,
    Resize(ResizeAnchor),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub shape_id: ShapeId,
    pub kind: ShapeKind,
    /// Pointer position at pointer-down, in screen space.
    pub start_pointer: Point,
    /// Shape geometry at pointer-down, in canvas space.
    pub start: Rect,
    pub mode: SessionMode,
}

impl DragSession {
    #[must_use]
    pub fn begin(shape: &Shape, start_pointer: Point, mode: SessionMode) -> Self {
        Self { shape_id: shape.id, kind: shape.kind, start_pointer, start: shape.rect(), mode }
    }

    /// Geometry for the pointer at `pointer` under transform `t`.
    #[must_use]
    pub fn geometry_at(&self, pointer: Point, t: &TransformState, rules: &SnapRules) -> Rect {
        let delta = t.screen_delta_to_canvas(pointer.sub(self.start_pointer));
        match self.mode {
            SessionMode::Move => move_geometry(self.start, delta, rules),
            SessionMode::Resize(anchor) => resize_geometry(self.start, anchor, delta, rules, self.kind.is_uniform()),
        }
    }
}

/// Translate `start` by a canvas-space `delta`, then snap and clamp the origin.
#[must_use]
pub fn move_geometry(start: Rect, delta: Point, rules: &SnapRules) -> Rect {
    Rect::new(rules.position(start.x + delta.x), rules.position(start.y + delta.y), start.w, start.h)
}

/// Resize `start` by dragging `anchor` through a canvas-space `delta`.
///
/// Edges the anchor does not name stay where they were. A moving low edge
/// is snapped itself and the length is re-derived from the pinned high edge,
/// so an off-grid start still lands on the grid. A shrinking drag stops at
/// `rules.min_size` and never turns the shape inside out. With `uniform` set
/// the result is square, sized by the larger of the width and height
/// candidates and pinned at the corner opposite the anchor.
#[must_use]
pub fn resize_geometry(start: Rect, anchor: ResizeAnchor, delta: Point, rules: &SnapRules, uniform: bool) -> Rect {
    let raw_w = if anchor.moves_left() {
        start.w - delta.x
    } else if anchor.moves_right() {
        start.w + delta.x
    } else {
        start.w
    };
    let raw_h = if anchor.moves_top() {
        start.h - delta.y
    } else if anchor.moves_bottom() {
        start.h + delta.y
    } else {
        start.h
    };

    if uniform {
        return resize_uniform(start, anchor, raw_w, raw_h, rules);
    }
    let resizes_x = anchor.moves_left() || anchor.moves_right();
    let resizes_y = anchor.moves_top() || anchor.moves_bottom();
    let (x, w) = resize_axis(start.x, start.right(), start.w, raw_w, resizes_x, anchor.moves_left(), rules);
    let (y, h) = resize_axis(start.y, start.bottom(), start.h, raw_h, resizes_y, anchor.moves_top(), rules);
    Rect::new(x, y, w, h)
}

/// New `(low, len)` for one axis of a free-aspect resize.
fn resize_axis(low: f64, high: f64, len: f64, raw_len: f64, resizes: bool, moves_low: bool, rules: &SnapRules) -> (f64, f64) {
    if !resizes {
        return (low, len);
    }
    if !moves_low {
        return (low, rules.size(raw_len));
    }
    let target = (high - raw_len).min(high - rules.min_size);
    let new_low = rules.position(target);
    (new_low, rules.size(high - new_low))
}

/// Square resize. In bounded mode the side is capped so that every moving
/// low edge stays at or right of zero, then floored to the quantum.
fn resize_uniform(start: Rect, anchor: ResizeAnchor, raw_w: f64, raw_h: f64, rules: &SnapRules) -> Rect {
    let resizes_x = anchor.moves_left() || anchor.moves_right();
    let resizes_y = anchor.moves_top() || anchor.moves_bottom();
    let mut side = match (resizes_x, resizes_y) {
        (true, true) => rules.size(raw_w).max(rules.size(raw_h)),
        (true, false) => rules.size(raw_w),
        _ => rules.size(raw_h),
    };

    if !rules.allow_negative {
        let mut cap = f64::INFINITY;
        if anchor.moves_left() {
            cap = cap.min(start.right());
        }
        if anchor.moves_top() {
            cap = cap.min(start.bottom());
        }
        if side > cap {
            let floored = match rules.quantum {
                Some(unit) => (cap / unit).floor() * unit,
                None => cap,
            };
            side = floored.max(rules.min_size);
        }
    }

    let x = if anchor.moves_left() { rules.position(start.right() - side) } else { start.x };
    let y = if anchor.moves_top() { rules.position(start.bottom() - side) } else { start.y };
    Rect::new(x, y, side, side)
}
