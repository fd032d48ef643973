//! Timer and alarm engines

pub mod alarm;
pub mod timer;

pub use alarm::{AlarmControl, AlarmEngine, ALARM_PATTERN, ALARM_REPEAT};
pub use timer::{TimerEngine, TICK_PERIOD};
