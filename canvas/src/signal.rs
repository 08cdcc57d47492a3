//! Typed publish/subscribe channels between loosely coupled components.
//!
//! The palette, the engine and any preview or grid renderers talk through
//! these instead of ambient global events. Everything runs on one thread, so
//! plain `std::sync::mpsc` channels are enough. Each subscriber queue is
//! bounded: publishing never blocks, and a subscriber that stops reading
//! misses messages instead of growing its queue without limit.

#[cfg(test)]
#[path = "signal_test.rs"]
mod signal_test;

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::BUS_CAPACITY;
use crate::doc::ShapeKind;

/// Fan-out publisher. Each subscriber gets its own copy of every message.
#[derive(Debug)]
pub struct Bus<T> {
    subscribers: Vec<SyncSender<T>>,
    capacity: usize,
}

impl<T> Default for Bus<T> {
    fn default() -> Self {
        Self::with_capacity(BUS_CAPACITY)
    }
}

impl<T> Bus<T> {
    /// A bus whose subscribers each queue at most `capacity` unread messages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { subscribers: Vec::new(), capacity: capacity.max(1) }
    }
}

impl<T: Clone> Bus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = mpsc::sync_channel(self.capacity);
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `message` to every live subscriber, forgetting any that hung up.
    ///
    /// A subscriber whose queue is full skips this message.
    pub fn publish(&mut self, message: &T) {
        self.subscribers.retain(|tx| match tx.try_send(message.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                debug!("subscriber queue full, message skipped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Messages from the shape palette announcing an external drag.
///
/// Browsers hide drag payloads until drop, so the palette announces the kind
/// up front for the drag-over preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaletteSignal {
    DragStarted { kind: ShapeKind },
    DragEnded,
}
