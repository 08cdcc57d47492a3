//! Error types for the canvas crate.
//!
//! Errors surface only from constructors and parsers. Input handlers never
//! return them: they log and fall back to a no-op instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    #[error("object unit must span at least one cell, got {0}")]
    InvalidObjectUnit(u32),
    #[error("invalid scale range [{min}, {max}]")]
    InvalidScaleRange { min: f64, max: f64 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unknown shape kind `{0}`")]
    UnknownShapeKind(String),
    #[error("unsupported drop payload type `{0}`")]
    UnsupportedPayload(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
