//! Error types shared across the crate

use thiserror::Error;

/// Rejected timer input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("timer duration must be greater than zero")]
    ZeroDuration,
}

/// Failure to emit an alarm tone. Never fatal to the timer.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write tone: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to show a desktop notification. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification permission not granted")]
    PermissionDenied,
    #[error("failed to execute notify-send: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("notify-send failed: {0}")]
    Command(String),
}

/// A line on stdin that is not a known command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command: {0} (type `help` for a list)")]
    Unknown(String),
    #[error("empty command")]
    Empty,
}
