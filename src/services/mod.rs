//! External collaborator module
//!
//! Tone output and desktop notifications. Both are best-effort.

pub mod audio;
pub mod notification;

// Re-export main types
pub use audio::{BellBackend, SilentBackend, Tone, ToneBackend};
pub use notification::{DesktopNotifier, DisabledNotifier, Notifier};
