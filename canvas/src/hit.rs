//! Resize-handle detection and z-ordered hit testing.
//!
//! All thresholds are in screen pixels, so handles keep the same grab size
//! at every zoom level.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, TransformState};
use crate::doc::{DocStore, ShapeId};

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

impl HitPart {
    /// CSS cursor for hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "move",
            Self::ResizeHandle(anchor) => anchor.cursor(),
        }
    }
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

/// Which resize handle, if any, is under `pointer`.
///
/// `rect` is the shape's on-screen bounding box. A pointer within `threshold`
/// of an edge (inside or outside the box) activates that edge; when two
/// adjacent edges are both in range the corner wins. On boxes narrower than
/// two thresholds the nearer of two opposite edges is chosen.
#[must_use]
pub fn detect_handle(rect: Rect, pointer: Point, threshold: f64) -> Option<ResizeAnchor> {
    if !rect.contains_with_margin(pointer, threshold) {
        return None;
    }

    let d_left = (pointer.x - rect.x).abs();
    let d_right = (pointer.x - rect.right()).abs();
    let d_top = (pointer.y - rect.y).abs();
    let d_bottom = (pointer.y - rect.bottom()).abs();

    let horizontal = match (d_left <= threshold, d_right <= threshold) {
        (true, true) => Some(if d_left <= d_right { Side::Start } else { Side::End }),
        (true, false) => Some(Side::Start),
        (false, true) => Some(Side::End),
        (false, false) => None,
    };
    let vertical = match (d_top <= threshold, d_bottom <= threshold) {
        (true, true) => Some(if d_top <= d_bottom { Side::Start } else { Side::End }),
        (true, false) => Some(Side::Start),
        (false, true) => Some(Side::End),
        (false, false) => None,
    };

    match (horizontal, vertical) {
        (Some(Side::Start), Some(Side::Start)) => Some(ResizeAnchor::Nw),
        (Some(Side::End), Some(Side::Start)) => Some(ResizeAnchor::Ne),
        (Some(Side::Start), Some(Side::End)) => Some(ResizeAnchor::Sw),
        (Some(Side::End), Some(Side::End)) => Some(ResizeAnchor::Se),
        (Some(Side::Start), None) => Some(ResizeAnchor::W),
        (Some(Side::End), None) => Some(ResizeAnchor::E),
        (None, Some(Side::Start)) => Some(ResizeAnchor::N),
        (None, Some(Side::End)) => Some(ResizeAnchor::S),
        (None, None) => None,
    }
}

#[derive(Clone, Copy)]
enum Side {
    Start,
    End,
}

/// The topmost shape under `screen_pt`, and which part of it was hit.
///
/// Shapes are tested from highest z down, each with its handle slop, so a
/// handle just outside a shape still beats a lower shape underneath.
#[must_use]
pub fn hit_test(screen_pt: Point, doc: &DocStore, t: &TransformState, threshold: f64) -> Option<Hit> {
    doc.sorted_shapes().into_iter().rev().find_map(|shape| {
        let screen_rect = t.canvas_rect_to_screen(shape.rect());
        if !screen_rect.contains_with_margin(screen_pt, threshold) {
            return None;
        }
        let part = detect_handle(screen_rect, screen_pt, threshold).map_or(HitPart::Body, HitPart::ResizeHandle);
        Some(Hit { shape_id: shape.id, part })
    })
}
