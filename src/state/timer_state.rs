//! Timer mode, snapshot and input structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::display::format_hms;

/// Phase of the countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerMode::Idle => "idle",
            TimerMode::Running => "running",
            TimerMode::Paused => "paused",
            TimerMode::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Read-only view of the countdown, published on every change
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub remaining_seconds: u64,
    pub total_duration_seconds: u64,
    pub mode: TimerMode,
}

impl TimerSnapshot {
    /// Create the initial idle snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the run still remaining, 1.0 when no run is configured
    pub fn progress(&self) -> f64 {
        progress_fraction(self.remaining_seconds, self.total_duration_seconds)
    }

    /// Remaining time as `HH:MM:SS`
    pub fn display(&self) -> String {
        format_hms(self.remaining_seconds)
    }
}

/// `remaining / total`, or 1.0 (full ring) when `total` is zero
pub fn progress_fraction(remaining_seconds: u64, total_duration_seconds: u64) -> f64 {
    if total_duration_seconds == 0 {
        return 1.0;
    }
    remaining_seconds as f64 / total_duration_seconds as f64
}

/// The three duration input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationInput {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationInput {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Build from raw field text. Unparseable fields count as zero.
    pub fn from_fields(hours: &str, minutes: &str, seconds: &str) -> Self {
        Self {
            hours: parse_field(hours),
            minutes: parse_field(minutes),
            seconds: parse_field(seconds),
        }
    }

    /// Total duration in seconds, saturating on overflow
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes.saturating_mul(60))
            .saturating_add(self.seconds)
    }
}

/// Parse the leading decimal digits of a field; anything else is zero.
pub fn parse_field(raw: &str) -> u64 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
