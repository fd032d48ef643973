//! State management module
//!
//! Timer mode, snapshots, input fields and the application state owned by the driver loop.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{progress_fraction, DurationInput, TimerMode, TimerSnapshot};
