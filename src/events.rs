//! Typed events published by the timer for presentation and notification

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::trace;

use crate::state::{TimerMode, TimerSnapshot};

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// One second elapsed and the run is still going
    Tick { remaining_seconds: u64, progress: f64 },
    /// The mode changed
    StateChange(TimerMode),
    /// `start` was refused because the duration was zero
    ValidationFailure,
    /// The countdown reached zero
    Complete,
}

/// Broadcast channel for events plus a watch channel for the latest snapshot
#[derive(Debug, Clone)]
pub struct EventBus {
    event_tx: broadcast::Sender<TimerEvent>,
    snapshot_tx: Arc<watch::Sender<TimerSnapshot>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::new());
        Self {
            event_tx,
            snapshot_tx: Arc::new(snapshot_tx),
        }
    }

    /// Subscribe to timer events
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    /// Watch the latest snapshot
    pub fn watch(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn emit(&self, event: TimerEvent) {
        // No subscribers is a normal state, not an error
        if let Err(e) = self.event_tx.send(event) {
            trace!("Timer event dropped: {}", e);
        }
    }

    pub fn publish(&self, snapshot: TimerSnapshot) {
        self.snapshot_tx.send_replace(snapshot);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
