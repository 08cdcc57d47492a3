//! Document model: shapes, their geometry, and the in-memory store.
//!
//! Geometry is always stored in canvas units. Grid coordinates are derived
//! on the way out (see [`GeometryUpdate::cells`]) rather than stored, so a
//! board can switch between snapped and free placement without migration.
//!
//! The store is the single owner of committed geometry. Live drag previews
//! never write here; only a commit does.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::camera::{Point, Rect};
use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE, DEFAULT_STROKE_WIDTH};
use crate::error::CanvasError;
use crate::grid::GridRect;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle card.
    Rect,
    /// Circle inscribed in a square bounding box.
    Circle,
}

impl ShapeKind {
    /// Whether resizing must keep width and height equal.
    #[must_use]
    pub fn is_uniform(self) -> bool {
        matches!(self, Self::Circle)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(Self::Rect),
            "circle" => Ok(Self::Circle),
            other => Err(CanvasError::UnknownShapeKind(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_owned(),
            stroke: DEFAULT_STROKE.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            opacity: 1.0,
        }
    }
}

/// A shape as stored in the document and handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Left edge in canvas units.
    pub x: f64,
    /// Top edge in canvas units.
    pub y: f64,
    /// Width in canvas units. Always positive.
    pub w: f64,
    /// Height in canvas units. Always positive.
    pub h: f64,
    /// Stacking order; higher values paint above and win hit tests.
    pub z: i64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub style: Style,
}

impl Shape {
    /// A new shape with a fresh id, default label and default style.
    #[must_use]
    pub fn new(kind: ShapeKind, rect: Rect, z: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            z,
            label: match kind {
                ShapeKind::Rect => "Rectangle".to_owned(),
                ShapeKind::Circle => "Circle".to_owned(),
            },
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Committed geometry for one shape, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryUpdate {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// The same geometry in whole cells, present when snapping is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<GridRect>,
}

impl GeometryUpdate {
    #[must_use]
    pub fn new(id: ShapeId, rect: Rect, cell_size: Option<f64>) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            cells: cell_size.map(|c| GridRect::nearest(rect, c)),
        }
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// In-memory store of shapes.
#[derive(Debug, Default)]
pub struct DocStore {
    shapes: HashMap<ShapeId, Shape>,
}

impl DocStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a shape. Shapes with non-finite or empty geometry
    /// are refused.
    pub fn insert(&mut self, shape: Shape) -> bool {
        if !shape.rect().is_well_formed() {
            warn!(id = %shape.id, w = shape.w, h = shape.h, "refusing malformed shape");
            return false;
        }
        self.shapes.insert(shape.id, shape);
        true
    }

    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        self.shapes.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Overwrite a shape's geometry. Returns false if the shape doesn't exist
    /// or the geometry is malformed.
    pub fn apply_geometry(&mut self, update: &GeometryUpdate) -> bool {
        if !update.rect().is_well_formed() {
            warn!(id = %update.id, w = update.w, h = update.h, "refusing malformed geometry");
            return false;
        }
        let Some(shape) = self.shapes.get_mut(&update.id) else {
            return false;
        };
        shape.x = update.x;
        shape.y = update.y;
        shape.w = update.w;
        shape.h = update.h;
        true
    }

    /// Replace all shapes with a full snapshot, skipping malformed ones.
    ///
    /// Returns how many shapes were skipped.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) -> usize {
        self.shapes.clear();
        let mut skipped = 0;
        for shape in shapes {
            if !self.insert(shape) {
                skipped += 1;
            }
        }
        skipped
    }

    /// Highest z in the store, if any.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.shapes.values().map(|s| s.z).max()
    }

    /// The z a newly created shape should take to land on top.
    #[must_use]
    pub fn next_z(&self) -> i64 {
        self.max_z().map_or(0, |z| z + 1)
    }

    /// Move a shape above every other shape.
    ///
    /// Returns the new z, or `None` when the shape is missing or already
    /// strictly on top.
    pub fn raise_to_front(&mut self, id: &ShapeId) -> Option<i64> {
        let current = self.shapes.get(id)?.z;
        let others_max = self.shapes.values().filter(|s| s.id != *id).map(|s| s.z).max();
        let target = match others_max {
            Some(max) if max >= current => max + 1,
            _ => return None,
        };
        let shape = self.shapes.get_mut(id)?;
        shape.z = target;
        Some(target)
    }

    /// All shapes sorted by `(z, id)` for paint order.
    #[must_use]
    pub fn sorted_shapes(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.shapes.values().collect();
        shapes.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.id.cmp(&b.id)));
        shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
