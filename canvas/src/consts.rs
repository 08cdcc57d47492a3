//! Shared numeric constants for the canvas crate.

// ── Grid ────────────────────────────────────────────────────────

/// Canvas units per grid cell at scale 1.
pub const DEFAULT_CELL_SIZE: f64 = 40.0;

/// Cells per side of a default-sized object block.
pub const DEFAULT_OBJECT_UNIT: u32 = 2;

// ── Zoom ────────────────────────────────────────────────────────

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;

/// Multiplicative step applied by programmatic zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;

/// Exponent applied per wheel pixel when zooming with Ctrl/Meta held.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Pixels per wheel tick when the browser reports line-mode deltas.
pub const WHEEL_LINE_PX: f64 = 20.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space slop in pixels around each edge for resize handles.
pub const HANDLE_THRESHOLD_PX: f64 = 8.0;

// ── Signals ─────────────────────────────────────────────────────

/// Messages a subscriber may leave unread before newer ones are dropped for it.
pub const BUS_CAPACITY: usize = 64;

// ── Drag and drop ───────────────────────────────────────────────

/// MIME type the palette uses for a bare shape kind name.
pub const SHAPE_KIND_MIME: &str = "application/x-shape-kind";

/// MIME type for a JSON `{"type": "shape", "kind": ...}` payload.
pub const JSON_MIME: &str = "application/json";

// ── Styling ─────────────────────────────────────────────────────

pub const DEFAULT_FILL: &str = "#FFFFFF";
pub const DEFAULT_STROKE: &str = "#555555";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
