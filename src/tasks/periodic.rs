//! Periodic task with an explicit arm/disarm contract
//!
//! An armed task pushes a [`Fire`] into the driver's channel once per period.
//! Fires carry the generation they were armed under, and the owner applies a
//! fire only when [`PeriodicTask::accepts`] says so. A fire that was already
//! queued when `disarm` ran is therefore rejected, even though it is still
//! sitting in the channel.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

/// Which schedule a fire belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Countdown tick
    Tick,
    /// Alarm tone pattern repeat
    AlarmRepeat,
}

/// One delivery from an armed schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fire {
    pub kind: TaskKind,
    pub generation: u64,
}

pub type FireSender = mpsc::UnboundedSender<Fire>;
pub type FireReceiver = mpsc::UnboundedReceiver<Fire>;

/// Create the channel every periodic task delivers into
pub fn fire_channel() -> (FireSender, FireReceiver) {
    mpsc::unbounded_channel()
}

/// A repeating schedule that can be armed and disarmed
#[derive(Debug)]
pub struct PeriodicTask {
    kind: TaskKind,
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
    fire_tx: FireSender,
}

impl PeriodicTask {
    pub fn new(kind: TaskKind, period: Duration, fire_tx: FireSender) -> Self {
        Self {
            kind,
            period,
            generation: 0,
            handle: None,
            fire_tx,
        }
    }

    /// Start firing every period, first fire one period from now.
    /// No-op when already armed. Must be called inside a tokio runtime.
    pub fn arm(&mut self) {
        if self.handle.is_some() {
            return;
        }

        self.generation += 1;
        let fire = Fire {
            kind: self.kind,
            generation: self.generation,
        };
        let period = self.period;
        let start = Instant::now() + period;
        let fire_tx = self.fire_tx.clone();

        debug!("Arming {:?} every {:?} (generation {})", self.kind, period, fire.generation);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(start, period);
            loop {
                interval.tick().await;
                if fire_tx.send(fire).is_err() {
                    // Driver is gone
                    break;
                }
            }
        }));
    }

    /// Stop firing. Fires already queued are rejected by [`accepts`](Self::accepts).
    pub fn disarm(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Disarming {:?} (generation {})", self.kind, self.generation);
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Whether `fire` came from the current arming of this task
    pub fn accepts(&self, fire: &Fire) -> bool {
        self.is_armed() && fire.kind == self.kind && fire.generation == self.generation
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.disarm();
    }
}
