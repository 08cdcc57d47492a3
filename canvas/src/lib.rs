//! Coordinate-transform and drag/resize engine for the grid whiteboard.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and it also
//! builds natively so the whole interaction model can be tested without one.
//! It keeps three coordinate spaces consistent: screen pixels, the unbounded
//! canvas, and the integer grid used for snapping. Raw pointer, wheel and
//! drag-and-drop events go in; [`engine::Action`]s describing previews,
//! committed geometry and view changes come out. Rendering and persistence
//! belong to the host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`camera`] | View transform and screen/canvas conversion |
//! | [`grid`] | Grid cells, object blocks and the background grid |
//! | [`snap`] | Quantizing positions and sizes |
//! | [`viewport`] | Pan/zoom controller that owns the transform |
//! | [`session`] | Move/resize session geometry |
//! | [`hit`] | Resize-handle detection and hit-testing |
//! | [`placement`] | Placement of shapes dropped from the palette |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`signal`] | Typed channels between palette, engine and renderers |
//! | [`doc`] | In-memory document store and shape types |
//! | [`config`] | Board configuration |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (zoom limits, thresholds, etc.) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hit;
pub mod input;
pub mod placement;
pub mod session;
pub mod signal;
pub mod snap;
pub mod viewport;
