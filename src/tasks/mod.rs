//! Background tasks module
//!
//! Scheduled fires for the engines, plus the tasks that render the readout and
//! announce completion.

pub mod notify;
pub mod periodic;
pub mod render;

// Re-export main functions
pub use notify::notification_task;
pub use periodic::{fire_channel, Fire, PeriodicTask, TaskKind};
pub use render::render_task;
