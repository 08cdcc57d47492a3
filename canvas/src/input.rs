//! Input model: buttons, modifier keys, wheel deltas, and the gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up (or drag-enter and drop). At most one gesture is live at a
//! time, which is what makes the drag session a per-canvas singleton.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect};
use crate::doc::{ShapeId, ShapeKind};
use crate::placement::DropPlacement;
use crate::session::DragSession;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: u8 = 1;
    pub const CTRL: u8 = 1 << 1;
    pub const ALT: u8 = 1 << 2;
    pub const META: u8 = 1 << 3;

    /// Decode the bitmask the JavaScript host packs modifier keys into.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self {
            shift: bits & Self::SHIFT != 0,
            ctrl: bits & Self::CTRL != 0,
            alt: bits & Self::ALT != 0,
            meta: bits & Self::META != 0,
        }
    }

    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A keyboard key as reported by `KeyboardEvent.key` (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

/// Unit of a wheel delta, mirroring `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive scrolls down.
    pub dy: f64,
    #[serde(default)]
    pub mode: DeltaMode,
}

impl WheelDelta {
    #[must_use]
    pub fn pixels(dx: f64, dy: f64) -> Self {
        Self { dx, dy, mode: DeltaMode::Pixel }
    }

    /// The delta in pixels, given how many pixels one line is worth.
    #[must_use]
    pub fn in_pixels(self, line_px: f64) -> Point {
        match self.mode {
            DeltaMode::Pixel => Point::new(self.dx, self.dy),
            DeltaMode::Line => Point::new(self.dx * line_px, self.dy * line_px),
        }
    }
}

/// Persistent UI state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected_id: Option<ShapeId>,
    /// Last cursor sent to the host, so hover only reports changes.
    pub cursor: String,
    /// Kind announced by the palette for the external drag in progress.
    pub palette_kind: Option<ShapeKind>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The canvas is being dragged by its background.
    Panning {
        /// Screen position of the previous pointer event.
        last_screen: Point,
    },
    /// A shape is being moved.
    Moving {
        session: DragSession,
        /// Latest pointer position, in screen space.
        pointer: Point,
        /// Geometry computed for `pointer`.
        current: Rect,
    },
    /// A shape is being resized by one of its eight handles.
    Resizing {
        session: DragSession,
        pointer: Point,
        current: Rect,
    },
    /// A palette shape is being dragged over the canvas.
    PendingExternalDrop {
        kind: ShapeKind,
        placement: DropPlacement,
    },
}

impl InputState {
    /// The move or resize session in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Moving { session, .. } | Self::Resizing { session, .. } => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
