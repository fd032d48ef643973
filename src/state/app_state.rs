//! Main application state: the engines plus the input fields

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    engine::{AlarmEngine, TimerEngine},
    tasks::periodic::{Fire, TaskKind},
};

use super::DurationInput;

/// Everything the driver loop owns. Constructed once in `main`.
#[derive(Debug)]
pub struct AppState {
    pub timer: TimerEngine<AlarmEngine>,
    /// Current contents of the hours/minutes/seconds fields
    pub inputs: DurationInput,
    pub start_time: Instant,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(timer: TimerEngine<AlarmEngine>, inputs: DurationInput) -> Self {
        Self {
            timer,
            inputs,
            start_time: Instant::now(),
            last_action: None,
            last_action_time: None,
        }
    }

    /// Route a fire to the engine whose schedule produced it
    pub fn dispatch_fire(&mut self, fire: Fire) {
        match fire.kind {
            TaskKind::Tick => self.timer.handle_fire(fire),
            TaskKind::AlarmRepeat => self.timer.alarm_mut().handle_fire(fire),
        }
    }

    /// Remember the most recent user action
    pub fn record_action(&mut self, action: &str) {
        debug!("Action: {}", action);
        self.last_action = Some(action.to_string());
        self.last_action_time = Some(Utc::now());
    }

    pub fn last_action(&self) -> (Option<&str>, Option<DateTime<Utc>>) {
        (self.last_action.as_deref(), self.last_action_time)
    }

    /// Seconds since the program started
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
