//! Placement of shapes dragged in from the palette.
//!
//! [`place_external`] is the only place drop geometry is computed. The
//! drag-over preview and the drop itself both call it with the same pointer
//! and transform, so the preview always shows the cell the shape lands in.
//!
//! A dropped shape occupies one object block centred on the pointer. With
//! snapping on, its top-left is rounded to the nearest block.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::camera::{Point, Rect, TransformState};
use crate::consts::{JSON_MIME, SHAPE_KIND_MIME};
use crate::doc::ShapeKind;
use crate::error::{CanvasError, CanvasResult};
use crate::grid::{GridCell, GridSpec};

/// Where an external shape would land for a given pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropPlacement {
    /// Block coordinates of the top-left corner when snapping.
    pub grid: Option<GridCell>,
    /// Footprint in canvas space.
    pub canvas: Rect,
    /// Footprint in screen space.
    pub screen: Rect,
}

/// Resolve the footprint of a palette shape dropped with the pointer at `pointer`.
#[must_use]
pub fn place_external(pointer: Point, t: &TransformState, grid: &GridSpec, snap: bool, allow_negative: bool) -> DropPlacement {
    let block = grid.block_size();
    let centre = t.screen_to_canvas(pointer);
    let top_left = Point::new(centre.x - block / 2.0, centre.y - block / 2.0);

    let (cell, origin) = if snap {
        let mut cell = grid.nearest_block(top_left);
        if !allow_negative {
            cell = cell.clamp_non_negative();
        }
        (Some(cell), grid.block_to_canvas(cell))
    } else if allow_negative {
        (None, top_left)
    } else {
        (None, Point::new(top_left.x.max(0.0), top_left.y.max(0.0)))
    };

    let canvas = Rect::new(origin.x, origin.y, block, block);
    DropPlacement { grid: cell, canvas, screen: t.canvas_rect_to_screen(canvas) }
}

#[derive(Deserialize)]
struct JsonPayload {
    #[serde(rename = "type")]
    payload_type: String,
    kind: String,
}

/// Extract the shape kind from a drag-and-drop payload.
pub fn parse_drop_payload(mime: &str, data: &str) -> CanvasResult<ShapeKind> {
    let kind: ShapeKind = match mime {
        SHAPE_KIND_MIME => data.trim().parse()?,
        JSON_MIME => {
            let payload: JsonPayload = serde_json::from_str(data)?;
            if payload.payload_type != "shape" {
                return Err(CanvasError::UnsupportedPayload(format!("{JSON_MIME} type {}", payload.payload_type)));
            }
            payload.kind.parse()?
        }
        other => return Err(CanvasError::UnsupportedPayload(other.to_owned())),
    };
    debug!(%kind, mime, "parsed drop payload");
    Ok(kind)
}
