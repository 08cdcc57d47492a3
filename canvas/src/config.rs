//! Board configuration.
//!
//! Every field has a default, so `{}` is a valid configuration. Values are
//! checked by [`BoardConfig::validate`] before an engine is built from them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CELL_SIZE, DEFAULT_OBJECT_UNIT, HANDLE_THRESHOLD_PX, MAX_SCALE, MIN_SCALE, WHEEL_LINE_PX,
    WHEEL_ZOOM_SENSITIVITY, ZOOM_STEP,
};
use crate::error::{CanvasError, CanvasResult};
use crate::grid::GridSpec;
use crate::snap::{SnapRules, SnapUnit};

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub cell_size: f64,
    pub object_unit: u32,
    pub snap_to_grid: bool,
    pub snap_unit: SnapUnit,
    /// When false the board has a top-left origin and nothing is placed above or left of it.
    pub allow_negative: bool,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_step: f64,
    pub wheel_zoom_sensitivity: f64,
    pub wheel_line_px: f64,
    pub handle_threshold_px: f64,
    /// Whether Ctrl/Meta+wheel zoom stays live while a move or resize is in progress.
    pub wheel_zoom_during_session: bool,
    pub raise_on_select: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            object_unit: DEFAULT_OBJECT_UNIT,
            snap_to_grid: true,
            snap_unit: SnapUnit::Cell,
            allow_negative: true,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_step: ZOOM_STEP,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            wheel_line_px: WHEEL_LINE_PX,
            handle_threshold_px: HANDLE_THRESHOLD_PX,
            wheel_zoom_during_session: true,
            raise_on_select: true,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(raw: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(CanvasError::InvalidCellSize(self.cell_size));
        }
        if self.object_unit == 0 {
            return Err(CanvasError::InvalidObjectUnit(self.object_unit));
        }
        let range_ok = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= self.max_scale;
        if !range_ok {
            return Err(CanvasError::InvalidScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(CanvasError::InvalidConfig(format!("zoom_step must exceed 1, got {}", self.zoom_step)));
        }
        if !self.wheel_zoom_sensitivity.is_finite() || self.wheel_zoom_sensitivity < 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "wheel_zoom_sensitivity must be non-negative, got {}",
                self.wheel_zoom_sensitivity
            )));
        }
        if !self.wheel_line_px.is_finite() || self.wheel_line_px <= 0.0 {
            return Err(CanvasError::InvalidConfig(format!("wheel_line_px must be positive, got {}", self.wheel_line_px)));
        }
        if !self.handle_threshold_px.is_finite() || self.handle_threshold_px < 0.0 {
            return Err(CanvasError::InvalidConfig(format!(
                "handle_threshold_px must be non-negative, got {}",
                self.handle_threshold_px
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> GridSpec {
        GridSpec { cell_size: self.cell_size, object_unit: self.object_unit }
    }

    /// Canvas-unit quantum used by move and resize, or `None` with snapping off.
    #[must_use]
    pub fn snap_quantum(&self) -> Option<f64> {
        if !self.snap_to_grid {
            return None;
        }
        Some(match self.snap_unit {
            SnapUnit::Cell => self.cell_size,
            SnapUnit::Block => self.grid().block_size(),
        })
    }

    #[must_use]
    pub fn snap_rules(&self) -> SnapRules {
        let quantum = self.snap_quantum();
        SnapRules {
            quantum,
            min_size: quantum.unwrap_or(self.cell_size),
            allow_negative: self.allow_negative,
        }
    }
}
