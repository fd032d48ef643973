//! ChronoPulse - a terminal countdown timer
//!
//! This library provides the countdown state machine, the alarm tone
//! sequencer, and the event plumbing that the terminal front end subscribes to.

pub mod api;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{AlarmControl, AlarmEngine, TimerEngine};
pub use error::ValidationError;
pub use events::{EventBus, TimerEvent};
pub use state::{AppState, DurationInput, TimerMode, TimerSnapshot};
pub use utils::signals::shutdown_signal;
