//! Grid quantization: snapping positions and sizes to multiples of a unit.
//!
//! All snapping goes through [`round_half_away_from_zero`] so that positive
//! and negative coordinates tie-break symmetrically. `f64::round` happens to
//! agree today, but the rule is written out here because the preview and
//! commit paths both depend on it.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Which quantum move/resize snapping uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapUnit {
    /// A single grid cell.
    #[default]
    Cell,
    /// An object block of `object_unit` cells.
    Block,
}

/// Round to the nearest integer, sending exact halves away from zero.
///
/// `0.5 -> 1`, `-0.5 -> -1`, `2.5 -> 3`, `-2.5 -> -3`.
#[must_use]
pub fn round_half_away_from_zero(v: f64) -> f64 {
    let magnitude = v.abs();
    let whole = magnitude.trunc();
    let rounded = if magnitude - whole >= 0.5 { whole + 1.0 } else { whole };
    if v < 0.0 && rounded > 0.0 { -rounded } else { rounded }
}

/// Snap a position to the nearest multiple of `unit`. Negative values stay negative.
#[must_use]
pub fn quantize_position(v: f64, unit: f64) -> f64 {
    round_half_away_from_zero(v / unit) * unit
}

/// Snap a size to the nearest multiple of `unit`, never below one unit.
#[must_use]
pub fn quantize_size(v: f64, unit: f64) -> f64 {
    (round_half_away_from_zero(v / unit) * unit).max(unit)
}

/// Index of the nearest multiple of `unit`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn nearest_index(v: f64, unit: f64) -> i64 {
    round_half_away_from_zero(v / unit) as i64
}

#[must_use]
pub fn quantize_point(p: Point, unit: f64) -> Point {
    Point::new(quantize_position(p.x, unit), quantize_position(p.y, unit))
}

/// Snapping and clamping rules shared by the move, resize and drop paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapRules {
    /// Quantum in canvas units, or `None` when snapping is off.
    pub quantum: Option<f64>,
    /// Smallest width/height a resize may produce.
    pub min_size: f64,
    /// When false, positions are clamped to `>= 0`.
    pub allow_negative: bool,
}

impl SnapRules {
    #[must_use]
    pub fn position(&self, v: f64) -> f64 {
        let v = match self.quantum {
            Some(unit) => quantize_position(v, unit),
            None => v,
        };
        if self.allow_negative { v } else { v.max(0.0) }
    }

    #[must_use]
    pub fn size(&self, v: f64) -> f64 {
        match self.quantum {
            Some(unit) => quantize_size(v, unit).max(self.min_size),
            None => v.max(self.min_size),
        }
    }
}
