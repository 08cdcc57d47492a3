//! The view transform and conversions between screen and canvas space.
//!
//! A [`TransformState`] maps canvas space to screen space with
//! `screen = canvas * scale + pan`. Its fields are private so that every
//! instance in circulation has passed [`TransformState::new`]: the scale is
//! positive and finite and the pan is finite. Conversions therefore never
//! divide by zero.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle. Top-left origin, `w` and `h` extend right and down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `p` lies inside the rectangle grown by `margin` on every side.
    #[must_use]
    pub fn contains_with_margin(&self, p: Point, margin: f64) -> bool {
        p.x >= self.x - margin && p.x <= self.right() + margin && p.y >= self.y - margin && p.y <= self.bottom() + margin
    }

    /// Finite origin and a strictly positive, finite size.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }
}

/// Pan/zoom transform from canvas space to screen space.
///
/// `pan_x` / `pan_y` are in CSS pixels, `scale` is screen pixels per canvas unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransformParts")]
pub struct TransformState {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
}

#[derive(Deserialize)]
struct TransformParts {
    pan_x: f64,
    pan_y: f64,
    scale: f64,
}

impl TryFrom<TransformParts> for TransformState {
    type Error = CanvasError;

    fn try_from(parts: TransformParts) -> CanvasResult<Self> {
        Self::new(parts.pan_x, parts.pan_y, parts.scale)
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformState {
    pub const IDENTITY: Self = Self { pan_x: 0.0, pan_y: 0.0, scale: 1.0 };

    /// Build a transform, rejecting a non-positive scale or any non-finite component.
    pub fn new(pan_x: f64, pan_y: f64, scale: f64) -> CanvasResult<Self> {
        if !pan_x.is_finite() {
            return Err(CanvasError::NonFinite { field: "pan_x" });
        }
        if !pan_y.is_finite() {
            return Err(CanvasError::NonFinite { field: "pan_y" });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CanvasError::InvalidScale(scale));
        }
        Ok(Self { pan_x, pan_y, scale })
    }

    #[must_use]
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    #[must_use]
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.scale,
            y: (screen.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.pan_x,
            y: canvas.y * self.scale + self.pan_y,
        }
    }

    /// Convert a screen-space displacement to a canvas-space displacement.
    ///
    /// Pan cancels out of a difference, so only the scale applies.
    #[must_use]
    pub fn screen_delta_to_canvas(&self, delta: Point) -> Point {
        Point::new(delta.x / self.scale, delta.y / self.scale)
    }

    #[must_use]
    pub fn canvas_len_to_screen(&self, len: f64) -> f64 {
        len * self.scale
    }

    #[must_use]
    pub fn canvas_rect_to_screen(&self, rect: Rect) -> Rect {
        let origin = self.canvas_to_screen(rect.origin());
        Rect::new(origin.x, origin.y, rect.w * self.scale, rect.h * self.scale)
    }
}
