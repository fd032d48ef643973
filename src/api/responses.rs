//! Command response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::format_uptime,
    state::{AppState, DurationInput, TimerMode},
};

/// Full status, printed as text or JSON by the `status` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub mode: TimerMode,
    pub remaining_seconds: u64,
    pub total_duration_seconds: u64,
    pub display: String,
    pub progress: f64,
    pub muted: bool,
    pub sounding: bool,
    pub inputs: DurationInput,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

impl StatusReport {
    pub fn from_state(state: &AppState) -> Self {
        let snapshot = state.timer.snapshot();
        let alarm = state.timer.alarm();
        let (last_action, last_action_time) = state.last_action();

        Self {
            mode: snapshot.mode,
            remaining_seconds: snapshot.remaining_seconds,
            total_duration_seconds: snapshot.total_duration_seconds,
            display: snapshot.display(),
            progress: snapshot.progress(),
            muted: alarm.is_muted(),
            sounding: alarm.is_sounding(),
            inputs: state.inputs,
            uptime: format_uptime(state.uptime_secs()),
            last_action: last_action.map(str::to_string),
            last_action_time,
            timestamp: Utc::now(),
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} {} of {}s ({:.0}%) | inputs {}h {}m {}s | sound {}{} | up {}",
            self.mode,
            self.display,
            self.total_duration_seconds,
            self.progress * 100.0,
            self.inputs.hours,
            self.inputs.minutes,
            self.inputs.seconds,
            if self.muted { "muted" } else { "on" },
            if self.sounding { ", alarm sounding" } else { "" },
            self.uptime,
        )
    }
}

/// What a handled command wants the front end to print
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Nothing to say; the readout already reflects the change
    Silent,
    Message(String),
    Quit,
}
