//! JSONL event scripts for `gridboard replay`.
//!
//! One event per line, tagged by `type`. Blank lines and lines starting with
//! `#` are skipped. Coordinates are viewport pixels.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::{BufRead, Write};

use gridboard::camera::Point;
use gridboard::consts::SHAPE_KIND_MIME;
use gridboard::doc::{Shape, ShapeId, ShapeKind};
use gridboard::engine::{Action, EngineCore};
use gridboard::input::{Button, DeltaMode, Key, Modifiers, WheelDelta};
use gridboard::signal::PaletteSignal;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::CliError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default = "primary")]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerCancel,
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        mode: DeltaMode,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PaletteStart {
        kind: ShapeKind,
    },
    PaletteEnd,
    DragOver {
        x: f64,
        y: f64,
    },
    DragLeave,
    Drop {
        x: f64,
        y: f64,
        #[serde(default = "shape_kind_mime")]
        mime: String,
        data: String,
    },
    ZoomIn,
    ZoomOut,
    ResetZoom,
    PlaceAtCenter {
        kind: ShapeKind,
    },
    Viewport {
        width: f64,
        height: f64,
    },
    Snapshot {
        shapes: Vec<Shape>,
    },
    /// A deletion made by another client.
    Delete {
        id: ShapeId,
    },
}

fn primary() -> Button {
    Button::Primary
}

fn shape_kind_mime() -> String {
    SHAPE_KIND_MIME.to_owned()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub actions: usize,
    pub skipped: usize,
}

/// Feed one event to the engine.
pub fn apply(core: &mut EngineCore, event: Event) -> Vec<Action> {
    match event {
        Event::PointerDown { x, y, button, modifiers } => core.on_pointer_down(Point::new(x, y), button, modifiers),
        Event::PointerMove { x, y, modifiers } => core.on_pointer_move(Point::new(x, y), modifiers),
        Event::PointerUp { x, y, button, modifiers } => core.on_pointer_up(Point::new(x, y), button, modifiers),
        Event::PointerCancel => core.on_pointer_cancel(),
        Event::Wheel { x, y, dx, dy, mode, modifiers } => core.on_wheel(Point::new(x, y), WheelDelta { dx, dy, mode }, modifiers),
        Event::Key { key, modifiers } => core.on_key_down(Key(key), modifiers),
        Event::PaletteStart { kind } => announce(core, PaletteSignal::DragStarted { kind }),
        Event::PaletteEnd => announce(core, PaletteSignal::DragEnded),
        Event::DragOver { x, y } => core.on_drag_over(Point::new(x, y)),
        Event::DragLeave => core.on_drag_leave(),
        Event::Drop { x, y, mime, data } => core.on_drop(Point::new(x, y), &mime, &data),
        Event::ZoomIn => core.zoom_in(),
        Event::ZoomOut => core.zoom_out(),
        Event::ResetZoom => core.reset_zoom(),
        Event::PlaceAtCenter { kind } => core.place_at_center(kind),
        Event::Viewport { width, height } => {
            core.set_viewport(width, height);
            Vec::new()
        }
        Event::Snapshot { shapes } => core.load_snapshot(shapes),
        Event::Delete { id } => core.apply_delete(&id),
    }
}

fn announce(core: &EngineCore, signal: PaletteSignal) -> Vec<Action> {
    if core.palette_sender().send(signal).is_err() {
        warn!(?signal, "palette channel closed");
    }
    Vec::new()
}

/// Replay every event in `reader`, writing each resulting action to `out` as one JSON line.
///
/// `RenderNeeded` carries nothing for a headless run and is not written.
pub fn replay<R: BufRead, W: Write>(core: &mut EngineCore, reader: R, out: &mut W) -> Result<ReplayStats, CliError> {
    let mut stats = ReplayStats::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            stats.skipped += 1;
            continue;
        }
        let event: Event = serde_json::from_str(trimmed).map_err(|source| CliError::Script { line: index + 1, source })?;
        trace!(line = index + 1, ?event, "replaying");
        stats.events += 1;
        for action in apply(core, event) {
            if action == Action::RenderNeeded {
                continue;
            }
            serde_json::to_writer(&mut *out, &action)?;
            out.write_all(b"\n")?;
            stats.actions += 1;
        }
    }
    Ok(stats)
}
