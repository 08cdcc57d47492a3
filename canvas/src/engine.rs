//! The interaction engine.
//!
//! [`EngineCore`] holds all state and logic and has no browser dependency, so
//! it is what the tests drive. [`Engine`] wraps it for JavaScript: it owns
//! the canvas element, converts client coordinates to viewport coordinates
//! and hands actions back as plain JS values.
//!
//! Handlers never fail. Anything they cannot act on (a malformed drop, a
//! shape deleted mid-gesture, a non-finite pointer) becomes a no-op plus a
//! log line.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::mem;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;
use tracing::{debug, trace, warn};
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::camera::{Point, Rect, TransformState};
use crate::config::BoardConfig;
use crate::doc::{DocStore, GeometryUpdate, Shape, ShapeId, ShapeKind};
use crate::error::{CanvasError, CanvasResult};
use crate::grid::{GridBackground, GridCell, GridRect, grid_background};
use crate::hit::{HitPart, hit_test};
use crate::input::{Button, DeltaMode, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::placement::{DropPlacement, parse_drop_payload, place_external};
use crate::session::{DragSession, SessionMode};
use crate::signal::PaletteSignal;
use crate::viewport::Viewport;

/// What the preview renderer should draw for the gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragPreview {
    /// The shape being moved or resized; `None` for a palette drag.
    pub shape_id: Option<ShapeId>,
    pub kind: ShapeKind,
    pub canvas: Rect,
    pub screen: Rect,
    /// Whole-cell geometry when snapping.
    pub cells: Option<GridRect>,
    /// Block coordinates of a palette drop when snapping.
    pub block: Option<GridCell>,
    pub visible: bool,
    pub snap_to_grid: bool,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Action {
    ShapeCreated(Shape),
    GeometryCommitted(GeometryUpdate),
    ShapeDeleted { id: ShapeId },
    ShapeRaised { id: ShapeId, z: i64 },
    SelectionChanged(Option<ShapeId>),
    PreviewChanged(DragPreview),
    PreviewCleared,
    /// A move or resize ended without committing; the shape keeps its start geometry.
    SessionCancelled { id: ShapeId },
    TransformChanged(TransformState),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub doc: DocStore,
    pub viewport: Viewport,
    pub ui: UiState,
    pub input: InputState,
    config: BoardConfig,
    palette_tx: Sender<PaletteSignal>,
    palette_rx: Receiver<PaletteSignal>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::build(BoardConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine for a board, rejecting an invalid configuration.
    pub fn with_config(config: BoardConfig) -> CanvasResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: BoardConfig) -> Self {
        let (palette_tx, palette_rx) = mpsc::channel();
        Self {
            doc: DocStore::new(),
            viewport: Viewport::new(&config),
            ui: UiState::default(),
            input: InputState::default(),
            config,
            palette_tx,
            palette_rx,
        }
    }

    // --- Data inputs ---

    /// Update viewport dimensions in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
    }

    /// Replace the document. A session whose shape is gone is abandoned.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) -> Vec<Action> {
        let skipped = self.doc.load_snapshot(shapes);
        if skipped > 0 {
            debug!(skipped, "snapshot loaded without malformed shapes");
        }
        if self.ui.selected_id.is_some_and(|id| !self.doc.contains(&id)) {
            self.ui.selected_id = None;
        }
        let orphaned = self.input.session().is_some_and(|s| !self.doc.contains(&s.shape_id));
        let mut actions = if orphaned { self.abandon_session() } else { Vec::new() };
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Apply a shape created elsewhere. Malformed geometry is refused.
    pub fn apply_create(&mut self, shape: Shape) -> bool {
        self.doc.insert(shape)
    }

    /// Apply geometry committed elsewhere. A live session keeps its own snapshot.
    pub fn apply_geometry(&mut self, update: &GeometryUpdate) -> bool {
        self.doc.apply_geometry(update)
    }

    /// Apply a deletion made elsewhere, abandoning any session on that shape.
    pub fn apply_delete(&mut self, id: &ShapeId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.input.session().is_some_and(|s| s.shape_id == *id) {
            actions.extend(self.abandon_session());
        }
        self.doc.remove(id);
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !screen_pt.is_finite() || !self.input.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Middle => self.begin_pan(screen_pt),
            Button::Primary if modifiers.alt => self.begin_pan(screen_pt),
            Button::Primary => self.press_primary(screen_pt),
            Button::Secondary => Vec::new(),
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !screen_pt.is_finite() {
            return Vec::new();
        }
        match self.input {
            InputState::Panning { last_screen } => {
                self.input = InputState::Panning { last_screen: screen_pt };
                self.viewport
                    .pan_by(screen_pt.sub(last_screen))
                    .map_or_else(Vec::new, |t| vec![Action::TransformChanged(t), Action::RenderNeeded])
            }
            InputState::Moving { .. } | InputState::Resizing { .. } => {
                let mut actions = self.update_session(screen_pt);
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::PendingExternalDrop { .. } => Vec::new(),
            InputState::Idle => self.hover(screen_pt),
        }
    }

    /// Pointer released. A move or resize commits the geometry for this exact position.
    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::Panning { .. } => {
                self.input = InputState::Idle;
                self.set_cursor("default").into_iter().collect()
            }
            InputState::Moving { .. } | InputState::Resizing { .. } => self.commit_session(screen_pt),
            InputState::Idle | InputState::PendingExternalDrop { .. } => Vec::new(),
        }
    }

    /// Pointer left the surface or lost capture without a pointer-up.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.cancel_gesture("pointer lost")
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let zoom = modifiers.command();
        if zoom && self.input.session().is_some() && !self.config.wheel_zoom_during_session {
            debug!("wheel zoom suppressed during shape gesture");
            return Vec::new();
        }
        let changed = self.viewport.wheel(screen_pt, delta, zoom);
        self.transform_actions(changed)
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => self.cancel_gesture("escape"),
            "Delete" | "Backspace" => self.delete_selected(),
            "d" | "D" if modifiers.command() => self.duplicate_selected(),
            "+" | "=" if modifiers.command() => self.zoom_in(),
            "-" if modifiers.command() => self.zoom_out(),
            "0" if modifiers.command() => self.reset_zoom(),
            _ => Vec::new(),
        }
    }

    // --- Zoom controls ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let changed = self.viewport.zoom_in();
        self.transform_actions(changed)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let changed = self.viewport.zoom_out();
        self.transform_actions(changed)
    }

    pub fn reset_zoom(&mut self) -> Vec<Action> {
        let changed = self.viewport.reset();
        self.transform_actions(changed)
    }

    // --- Palette and external drops ---

    /// Sender for the palette to announce external drags on.
    #[must_use]
    pub fn palette_sender(&self) -> Sender<PaletteSignal> {
        self.palette_tx.clone()
    }

    /// A palette drag is over the canvas at `screen_pt`.
    pub fn on_drag_over(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = self.drain_palette();
        if !screen_pt.is_finite() || self.input.session().is_some() || matches!(self.input, InputState::Panning { .. }) {
            return actions;
        }
        let Some(kind) = self.ui.palette_kind else {
            return actions;
        };
        let placement = self.place(screen_pt);
        let unchanged = matches!(
            &self.input,
            InputState::PendingExternalDrop { kind: k, placement: p } if *k == kind && *p == placement
        );
        self.input = InputState::PendingExternalDrop { kind, placement };
        if !unchanged {
            trace!(grid = ?placement.grid, "drop preview moved");
            actions.push(Action::PreviewChanged(self.drop_preview(kind, &placement)));
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_drag_leave(&mut self) -> Vec<Action> {
        let mut actions = self.drain_palette();
        if matches!(self.input, InputState::PendingExternalDrop { .. }) {
            self.input = InputState::Idle;
            actions.push(Action::PreviewCleared);
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// A palette drag was dropped. Malformed payloads create nothing.
    pub fn on_drop(&mut self, screen_pt: Point, mime: &str, data: &str) -> Vec<Action> {
        let mut actions = self.drain_palette();
        if matches!(self.input, InputState::PendingExternalDrop { .. }) {
            self.input = InputState::Idle;
            actions.push(Action::PreviewCleared);
        }
        self.ui.palette_kind = None;
        if !screen_pt.is_finite() || !self.input.is_idle() {
            return actions;
        }
        let kind = match parse_drop_payload(mime, data) {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, mime, "ignoring drop");
                actions.push(Action::RenderNeeded);
                return actions;
            }
        };
        let placement = self.place(screen_pt);
        actions.extend(self.create_shape(kind, &placement));
        actions
    }

    /// Palette click: create a shape over the viewport centre.
    pub fn place_at_center(&mut self, kind: ShapeKind) -> Vec<Action> {
        if self.input.session().is_some() {
            return Vec::new();
        }
        let placement = self.place(self.viewport.center());
        self.create_shape(kind, &placement)
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn transform(&self) -> TransformState {
        self.viewport.current()
    }

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn is_session_active(&self) -> bool {
        self.input.session().is_some()
    }

    /// Background grid line spacing and phase for the current view.
    #[must_use]
    pub fn grid_background(&self) -> GridBackground {
        grid_background(&self.viewport.current(), self.config.cell_size)
    }

    // --- Gestures ---

    fn begin_pan(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.viewport.is_pan_locked() {
            return Vec::new();
        }
        self.input = InputState::Panning { last_screen: screen_pt };
        self.set_cursor("grabbing").into_iter().collect()
    }

    fn press_primary(&mut self, screen_pt: Point) -> Vec<Action> {
        let t = self.viewport.current();
        let Some(hit) = hit_test(screen_pt, &self.doc, &t, self.config.handle_threshold_px) else {
            let mut actions = self.select(None);
            actions.extend(self.begin_pan(screen_pt));
            return actions;
        };

        let mut actions = self.select(Some(hit.shape_id));
        if self.config.raise_on_select {
            if let Some(z) = self.doc.raise_to_front(&hit.shape_id) {
                actions.push(Action::ShapeRaised { id: hit.shape_id, z });
            }
        }
        let Some(shape) = self.doc.get(&hit.shape_id) else {
            return actions;
        };

        let mode = match hit.part {
            HitPart::Body => SessionMode::Move,
            HitPart::ResizeHandle(anchor) => SessionMode::Resize(anchor),
        };
        let session = DragSession::begin(shape, screen_pt, mode);
        let current = session.start;
        debug!(id = %hit.shape_id, ?mode, "session started");
        self.input = match mode {
            SessionMode::Move => InputState::Moving { session, pointer: screen_pt, current },
            SessionMode::Resize(_) => InputState::Resizing { session, pointer: screen_pt, current },
        };
        self.viewport.set_pan_locked(true);
        actions.extend(self.set_cursor(hit.part.cursor()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Recompute the live geometry for `screen_pt` and emit it as a preview.
    fn update_session(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(session) = self.input.session() else {
            return Vec::new();
        };
        if !self.doc.contains(&session.shape_id) {
            warn!(id = %session.shape_id, "shape vanished mid-gesture");
            return self.abandon_session();
        }
        let rect = session.geometry_at(screen_pt, &self.viewport.current(), &self.config.snap_rules());
        let preview = self.session_preview(session, rect);
        if let InputState::Moving { pointer, current, .. } | InputState::Resizing { pointer, current, .. } = &mut self.input {
            *pointer = screen_pt;
            *current = rect;
        }
        trace!(x = rect.x, y = rect.y, w = rect.w, h = rect.h, "session preview");
        vec![Action::PreviewChanged(preview)]
    }

    fn commit_session(&mut self, screen_pt: Point) -> Vec<Action> {
        let state = mem::take(&mut self.input);
        self.viewport.set_pan_locked(false);
        let (session, pointer) = match state {
            InputState::Moving { session, pointer, .. } | InputState::Resizing { session, pointer, .. } => (session, pointer),
            _ => return Vec::new(),
        };
        let pointer = if screen_pt.is_finite() { screen_pt } else { pointer };

        let mut actions = vec![Action::PreviewCleared];
        if !self.doc.contains(&session.shape_id) {
            warn!(id = %session.shape_id, "shape vanished before commit");
            actions.push(Action::SessionCancelled { id: session.shape_id });
        } else {
            let rect = session.geometry_at(pointer, &self.viewport.current(), &self.config.snap_rules());
            if rect != session.start {
                let cell_size = self.config.snap_to_grid.then_some(self.config.cell_size);
                let update = GeometryUpdate::new(session.shape_id, rect, cell_size);
                self.doc.apply_geometry(&update);
                debug!(id = %session.shape_id, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "geometry committed");
                actions.push(Action::GeometryCommitted(update));
            }
        }
        actions.extend(self.set_cursor("default"));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// End the gesture in progress without committing anything.
    fn cancel_gesture(&mut self, reason: &str) -> Vec<Action> {
        let state = mem::take(&mut self.input);
        self.viewport.set_pan_locked(false);
        let mut actions = match state {
            InputState::Idle => return Vec::new(),
            InputState::Panning { .. } => Vec::new(),
            InputState::Moving { session, .. } | InputState::Resizing { session, .. } => {
                debug!(id = %session.shape_id, reason, "session cancelled");
                vec![Action::PreviewCleared, Action::SessionCancelled { id: session.shape_id }]
            }
            InputState::PendingExternalDrop { .. } => vec![Action::PreviewCleared],
        };
        actions.extend(self.set_cursor("default"));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drop the session because its shape no longer exists. Emits no geometry.
    fn abandon_session(&mut self) -> Vec<Action> {
        let state = mem::take(&mut self.input);
        self.viewport.set_pan_locked(false);
        match state.session() {
            Some(session) => vec![Action::PreviewCleared, Action::SessionCancelled { id: session.shape_id }],
            None => Vec::new(),
        }
    }

    fn hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let t = self.viewport.current();
        let cursor = hit_test(screen_pt, &self.doc, &t, self.config.handle_threshold_px)
            .map_or("default", |hit| hit.part.cursor());
        self.set_cursor(cursor).into_iter().collect()
    }

    fn transform_actions(&mut self, changed: Option<TransformState>) -> Vec<Action> {
        let Some(t) = changed else {
            return Vec::new();
        };
        let mut actions = vec![Action::TransformChanged(t)];
        let pointer = match self.input {
            InputState::Moving { pointer, .. } | InputState::Resizing { pointer, .. } => Some(pointer),
            _ => None,
        };
        if let Some(pointer) = pointer {
            actions.extend(self.update_session(pointer));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Selection and editing ---

    fn select(&mut self, id: Option<ShapeId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id)]
    }

    fn delete_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };
        let mut actions = self.apply_delete(&id);
        actions.insert(0, Action::ShapeDeleted { id });
        actions
    }

    fn duplicate_selected(&mut self) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(source) = self.ui.selected_id.and_then(|id| self.doc.get(&id)) else {
            return Vec::new();
        };
        let offset = self.config.cell_size;
        let rect = Rect::new(source.x + offset, source.y + offset, source.w, source.h);
        let mut copy = Shape::new(source.kind, rect, self.doc.next_z());
        copy.label.clone_from(&source.label);
        copy.style = source.style.clone();
        self.insert_and_select(copy)
    }

    fn create_shape(&mut self, kind: ShapeKind, placement: &DropPlacement) -> Vec<Action> {
        let shape = Shape::new(kind, placement.canvas, self.doc.next_z());
        debug!(id = %shape.id, %kind, x = shape.x, y = shape.y, "shape placed");
        self.insert_and_select(shape)
    }

    fn insert_and_select(&mut self, shape: Shape) -> Vec<Action> {
        let id = shape.id;
        self.doc.insert(shape.clone());
        let mut actions = vec![Action::ShapeCreated(shape)];
        actions.extend(self.select(Some(id)));
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Helpers ---

    fn place(&self, screen_pt: Point) -> DropPlacement {
        place_external(
            screen_pt,
            &self.viewport.current(),
            &self.config.grid(),
            self.config.snap_to_grid,
            self.config.allow_negative,
        )
    }

    fn drop_preview(&self, kind: ShapeKind, placement: &DropPlacement) -> DragPreview {
        let snap = self.config.snap_to_grid;
        DragPreview {
            shape_id: None,
            kind,
            canvas: placement.canvas,
            screen: placement.screen,
            cells: snap.then(|| GridRect::nearest(placement.canvas, self.config.cell_size)),
            block: placement.grid,
            visible: true,
            snap_to_grid: snap,
        }
    }

    fn session_preview(&self, session: &DragSession, rect: Rect) -> DragPreview {
        let snap = self.config.snap_to_grid;
        DragPreview {
            shape_id: Some(session.shape_id),
            kind: session.kind,
            canvas: rect,
            screen: self.viewport.current().canvas_rect_to_screen(rect),
            cells: snap.then(|| GridRect::nearest(rect, self.config.cell_size)),
            block: None,
            visible: true,
            snap_to_grid: snap,
        }
    }

    fn drain_palette(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(signal) = self.palette_rx.try_recv() {
            match signal {
                PaletteSignal::DragStarted { kind } => self.ui.palette_kind = Some(kind),
                PaletteSignal::DragEnded => {
                    self.ui.palette_kind = None;
                    if matches!(self.input, InputState::PendingExternalDrop { .. }) {
                        self.input = InputState::Idle;
                        actions.push(Action::PreviewCleared);
                    }
                }
            }
        }
        actions
    }

    fn set_cursor(&mut self, cursor: &str) -> Option<Action> {
        if self.ui.cursor == cursor {
            return None;
        }
        cursor.clone_into(&mut self.ui.cursor);
        Some(Action::SetCursor(cursor.to_owned()))
    }
}

/// The browser-facing engine. Wraps `EngineCore` and owns the canvas element.
#[wasm_bindgen]
pub struct Engine {
    canvas: HtmlCanvasElement,
    core: EngineCore,
    palette: Sender<PaletteSignal>,
}

#[wasm_bindgen]
impl Engine {
    /// Create an engine bound to `canvas`, optionally with a JSON board config.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Engine, JsValue> {
        let config = match config_json {
            Some(raw) => BoardConfig::from_json(&raw).map_err(js_error)?,
            None => BoardConfig::default(),
        };
        let core = EngineCore::with_config(config).map_err(js_error)?;
        let palette = core.palette_sender();
        let mut engine = Self { canvas, core, palette };
        engine.sync_viewport();
        Ok(engine)
    }

    /// Re-read the canvas size. Call on every resize.
    pub fn sync_viewport(&mut self) {
        let width = f64::from(self.canvas.client_width());
        let height = f64::from(self.canvas.client_height());
        self.core.set_viewport(width, height);
    }

    pub fn load_snapshot(&mut self, shapes_json: &str) -> Result<JsValue, JsValue> {
        let shapes: Vec<Shape> = serde_json::from_str(shapes_json).map_err(|e| js_error(CanvasError::Json(e)))?;
        to_js(&self.core.load_snapshot(shapes))
    }

    pub fn apply_delete(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let id: ShapeId = id.parse().map_err(|e: uuid::Error| JsValue::from_str(&e.to_string()))?;
        to_js(&self.core.apply_delete(&id))
    }

    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16, modifiers: u8) -> Result<JsValue, JsValue> {
        let Some(button) = Button::from_dom(button) else {
            return to_js(&Vec::<Action>::new());
        };
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_pointer_down(pt, button, Modifiers::from_bits(modifiers)))
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, modifiers: u8) -> Result<JsValue, JsValue> {
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_pointer_move(pt, Modifiers::from_bits(modifiers)))
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, button: i16, modifiers: u8) -> Result<JsValue, JsValue> {
        let button = Button::from_dom(button).unwrap_or(Button::Primary);
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_pointer_up(pt, button, Modifiers::from_bits(modifiers)))
    }

    /// `pointerleave`, `pointercancel` and `lostpointercapture` all land here.
    pub fn pointer_cancel(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.core.on_pointer_cancel())
    }

    /// `delta_mode` is `WheelEvent.deltaMode`; page mode is treated as lines.
    pub fn wheel(&mut self, client_x: f64, client_y: f64, dx: f64, dy: f64, delta_mode: u32, modifiers: u8) -> Result<JsValue, JsValue> {
        let mode = if delta_mode == 0 { DeltaMode::Pixel } else { DeltaMode::Line };
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_wheel(pt, WheelDelta { dx, dy, mode }, Modifiers::from_bits(modifiers)))
    }

    pub fn key_down(&mut self, key: String, modifiers: u8) -> Result<JsValue, JsValue> {
        to_js(&self.core.on_key_down(Key(key), Modifiers::from_bits(modifiers)))
    }

    pub fn zoom_in(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.core.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.core.zoom_out())
    }

    pub fn reset_zoom(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.core.reset_zoom())
    }

    /// Called by the palette on `dragstart`.
    pub fn palette_drag_start(&self, kind: &str) -> Result<(), JsValue> {
        let kind: ShapeKind = kind.parse().map_err(js_error)?;
        self.announce(PaletteSignal::DragStarted { kind });
        Ok(())
    }

    /// Called by the palette on `dragend`, whether or not a drop happened.
    pub fn palette_drag_end(&self) {
        self.announce(PaletteSignal::DragEnded);
    }

    pub fn drag_over(&mut self, client_x: f64, client_y: f64) -> Result<JsValue, JsValue> {
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_drag_over(pt))
    }

    pub fn drag_leave(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.core.on_drag_leave())
    }

    pub fn drop_at(&mut self, client_x: f64, client_y: f64, mime: &str, data: &str) -> Result<JsValue, JsValue> {
        let pt = self.local_point(client_x, client_y);
        to_js(&self.core.on_drop(pt, mime, data))
    }

    pub fn place_at_center(&mut self, kind: &str) -> Result<JsValue, JsValue> {
        let kind: ShapeKind = kind.parse().map_err(js_error)?;
        to_js(&self.core.place_at_center(kind))
    }

    pub fn transform(&self) -> Result<JsValue, JsValue> {
        to_js(&self.core.transform())
    }

    pub fn grid_background(&self) -> Result<JsValue, JsValue> {
        to_js(&self.core.grid_background())
    }
}

impl Engine {
    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Convert client coordinates to coordinates relative to the canvas's top-left.
    fn local_point(&self, client_x: f64, client_y: f64) -> Point {
        let bounds = self.canvas.get_bounding_client_rect();
        Point::new(client_x - bounds.left(), client_y - bounds.top())
    }

    fn announce(&self, signal: PaletteSignal) {
        if self.palette.send(signal).is_err() {
            warn!(?signal, "palette channel closed");
        }
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(|e| js_error(CanvasError::Json(e)))?;
    js_sys::JSON::parse(&json)
}

fn js_error(e: CanvasError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
