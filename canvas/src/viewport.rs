//! Pan/zoom controller: the single writer of the view transform.
//!
//! Everything that changes the view goes through [`Viewport::commit`], which
//! stores the new transform and publishes it to subscribers. Readers either
//! call [`Viewport::current`] or listen on a subscription; both observe the
//! same value.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::sync::mpsc::Receiver;

use tracing::{debug, warn};

use crate::camera::{Point, TransformState};
use crate::config::BoardConfig;
use crate::input::WheelDelta;
use crate::signal::Bus;

#[derive(Debug)]
pub struct Viewport {
    transform: TransformState,
    min_scale: f64,
    max_scale: f64,
    zoom_step: f64,
    wheel_zoom_sensitivity: f64,
    wheel_line_px: f64,
    width: f64,
    height: f64,
    /// Set while a shape gesture owns the pointer; background panning is refused.
    pan_locked: bool,
    changes: Bus<TransformState>,
}

impl Viewport {
    #[must_use]
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            transform: TransformState::IDENTITY,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            zoom_step: config.zoom_step,
            wheel_zoom_sensitivity: config.wheel_zoom_sensitivity,
            wheel_line_px: config.wheel_line_px,
            width: 0.0,
            height: 0.0,
            pan_locked: false,
            changes: Bus::new(),
        }
    }

    /// The transform in effect right now.
    #[must_use]
    pub fn current(&self) -> TransformState {
        self.transform
    }

    /// Receive every subsequent transform change.
    pub fn subscribe(&mut self) -> Receiver<TransformState> {
        self.changes.subscribe()
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Centre of the viewport in screen space.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    #[must_use]
    pub fn is_pan_locked(&self) -> bool {
        self.pan_locked
    }

    pub fn set_pan_locked(&mut self, locked: bool) {
        self.pan_locked = locked;
    }

    /// Translate the view by a screen-space delta. Refused while panning is locked.
    pub fn pan_by(&mut self, delta: Point) -> Option<TransformState> {
        if self.pan_locked {
            debug!("pan suppressed during shape gesture");
            return None;
        }
        let t = self.transform;
        self.try_commit(t.pan_x() + delta.x, t.pan_y() + delta.y, t.scale())
    }

    /// Set the scale to `new_scale` (clamped) keeping the canvas point under `focal` fixed on screen.
    pub fn zoom_at(&mut self, focal: Point, new_scale: f64) -> Option<TransformState> {
        if !focal.is_finite() || !new_scale.is_finite() {
            warn!(new_scale, "rejected non-finite zoom");
            return None;
        }
        let scale = new_scale.clamp(self.min_scale, self.max_scale);
        let anchor = self.transform.screen_to_canvas(focal);
        self.try_commit(focal.x - anchor.x * scale, focal.y - anchor.y * scale, scale)
    }

    /// Multiply the scale by `factor` around `focal`.
    pub fn zoom_by(&mut self, focal: Point, factor: f64) -> Option<TransformState> {
        self.zoom_at(focal, self.transform.scale() * factor)
    }

    pub fn zoom_in(&mut self) -> Option<TransformState> {
        self.zoom_by(self.center(), self.zoom_step)
    }

    pub fn zoom_out(&mut self) -> Option<TransformState> {
        self.zoom_by(self.center(), 1.0 / self.zoom_step)
    }

    /// Return to scale 1 around the viewport centre.
    pub fn reset(&mut self) -> Option<TransformState> {
        self.zoom_at(self.center(), 1.0)
    }

    /// Apply a wheel event: zoom around `focal` when `zoom` is set, otherwise pan.
    ///
    /// Scrolling down (positive `dy`) zooms out.
    pub fn wheel(&mut self, focal: Point, delta: WheelDelta, zoom: bool) -> Option<TransformState> {
        let px = delta.in_pixels(self.wheel_line_px);
        if zoom {
            self.zoom_by(focal, (-px.y * self.wheel_zoom_sensitivity).exp())
        } else {
            self.pan_by(Point::new(-px.x, -px.y))
        }
    }

    /// Put canvas point `target` at the viewport centre at scale `scale` (clamped).
    pub fn center_on(&mut self, target: Point, scale: f64) -> Option<TransformState> {
        if !scale.is_finite() {
            warn!(scale, "rejected non-finite scale");
            return None;
        }
        let scale = scale.clamp(self.min_scale, self.max_scale);
        let c = self.center();
        self.try_commit(c.x - target.x * scale, c.y - target.y * scale, scale)
    }

    /// Replace the transform outright, e.g. when restoring a saved view.
    pub fn set_transform(&mut self, t: TransformState) -> Option<TransformState> {
        let scale = t.scale().clamp(self.min_scale, self.max_scale);
        self.try_commit(t.pan_x(), t.pan_y(), scale)
    }

    fn try_commit(&mut self, pan_x: f64, pan_y: f64, scale: f64) -> Option<TransformState> {
        match TransformState::new(pan_x, pan_y, scale) {
            Ok(t) => self.commit(t),
            Err(e) => {
                warn!(error = %e, "rejected transform");
                None
            }
        }
    }

    fn commit(&mut self, t: TransformState) -> Option<TransformState> {
        if t == self.transform {
            return None;
        }
        self.transform = t;
        self.changes.publish(&t);
        debug!(pan_x = t.pan_x(), pan_y = t.pan_y(), scale = t.scale(), "transform changed");
        Some(t)
    }
}
