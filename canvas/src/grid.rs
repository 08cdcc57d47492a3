//! Grid cells and conversions between canvas space and grid space.
//!
//! Two granularities exist. A *cell* is `cell_size` canvas units wide. A
//! *block* is `object_unit` cells wide and is the footprint of a default
//! object; external drops are addressed in blocks.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, TransformState};
use crate::snap::nearest_index;

/// Integer grid coordinates. May be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i64,
    pub y: i64,
}

impl GridCell {
    #[must_use]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        Self { x: self.x.max(0), y: self.y.max(0) }
    }
}

/// A rectangle measured in whole cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl GridRect {
    /// The cell rectangle nearest to a canvas rectangle.
    #[must_use]
    pub fn nearest(rect: Rect, cell_size: f64) -> Self {
        Self {
            x: nearest_index(rect.x, cell_size),
            y: nearest_index(rect.y, cell_size),
            w: nearest_index(rect.w, cell_size),
            h: nearest_index(rect.h, cell_size),
        }
    }
}

/// Cell size and object unit for one board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cell_size: f64,
    pub object_unit: u32,
}

impl GridSpec {
    /// Side length of an object block in canvas units.
    #[must_use]
    pub fn block_size(&self) -> f64 {
        self.cell_size * f64::from(self.object_unit)
    }

    /// The block whose snapped origin is nearest to `top_left`.
    #[must_use]
    pub fn nearest_block(&self, top_left: Point) -> GridCell {
        let block = self.block_size();
        GridCell::new(nearest_index(top_left.x, block), nearest_index(top_left.y, block))
    }

    #[must_use]
    pub fn block_to_canvas(&self, g: GridCell) -> Point {
        grid_to_canvas(g, self.block_size())
    }

    /// Screen position of a block's top-left corner.
    #[must_use]
    pub fn block_to_screen(&self, g: GridCell, t: &TransformState) -> Point {
        t.canvas_to_screen(self.block_to_canvas(g))
    }
}

/// The cell containing canvas point `p`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn canvas_to_grid(p: Point, cell_size: f64) -> GridCell {
    GridCell::new((p.x / cell_size).floor() as i64, (p.y / cell_size).floor() as i64)
}

/// Canvas position of a cell's top-left corner.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_to_canvas(g: GridCell, cell_size: f64) -> Point {
    Point::new(g.x as f64 * cell_size, g.y as f64 * cell_size)
}

/// On-screen spacing and phase of background grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridBackground {
    pub spacing: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Project the grid onto the screen for the background renderer.
///
/// Offsets are in `[0, spacing)` regardless of the sign of the pan.
#[must_use]
pub fn grid_background(t: &TransformState, cell_size: f64) -> GridBackground {
    let spacing = cell_size * t.scale();
    GridBackground {
        spacing,
        offset_x: t.pan_x().rem_euclid(spacing),
        offset_y: t.pan_y().rem_euclid(spacing),
    }
}
