//! Alarm tone sequencing and mute state

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    services::audio::{Tone, ToneBackend},
    tasks::periodic::{Fire, PeriodicTask},
};

/// How often the tone pattern repeats while the alarm sounds
pub const ALARM_REPEAT: Duration = Duration::from_millis(1000);

/// The fixed three-note pattern played on every repeat
pub const ALARM_PATTERN: [Tone; 3] = [
    Tone::new(800.0, 100, 0),
    Tone::new(600.0, 100, 150),
    Tone::new(800.0, 100, 300),
];

/// What the timer needs from an alarm
pub trait AlarmControl {
    /// Begin sounding. Idempotent while already sounding.
    fn play_alarm(&mut self);
    /// Stop sounding. Idempotent.
    fn stop_alarm(&mut self);
}

/// Repeating alarm with a mute flag that outlives individual alarms
pub struct AlarmEngine {
    muted: bool,
    sounding: bool,
    repeat: PeriodicTask,
    backend: Box<dyn ToneBackend>,
}

impl AlarmEngine {
    pub fn new(backend: Box<dyn ToneBackend>, repeat: PeriodicTask, muted: bool) -> Self {
        Self {
            muted,
            sounding: false,
            repeat,
            backend,
        }
    }

    /// Flip the mute flag and return the new value. Applies from the next alarm on.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        info!("Alarm muted: {}", self.muted);
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Handle a repeat fire from the driver loop
    pub fn handle_fire(&mut self, fire: Fire) {
        if !self.repeat.accepts(&fire) {
            debug!("Ignoring stale alarm fire {:?}", fire);
            return;
        }
        self.play_pattern();
    }

    fn play_pattern(&self) {
        for tone in ALARM_PATTERN {
            if let Err(e) = self.backend.emit(tone) {
                debug!("Alarm tone skipped: {}", e);
            }
        }
    }
}

impl AlarmControl for AlarmEngine {
    fn play_alarm(&mut self) {
        if self.sounding {
            return;
        }
        self.sounding = true;

        if self.muted {
            info!("Alarm triggered while muted");
            return;
        }

        info!("Alarm sounding");
        self.repeat.arm();
    }

    fn stop_alarm(&mut self) {
        self.repeat.disarm();
        if self.sounding {
            info!("Alarm stopped");
        }
        self.sounding = false;
    }
}

impl std::fmt::Debug for AlarmEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlarmEngine")
            .field("muted", &self.muted)
            .field("sounding", &self.sounding)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::audio::testing::{BrokenBackend, RecordingBackend},
        tasks::periodic::{fire_channel, FireReceiver, TaskKind},
    };
    use tokio::time;

    fn alarm_with(backend: RecordingBackend, muted: bool) -> (AlarmEngine, FireReceiver) {
        let (tx, rx) = fire_channel();
        let repeat = PeriodicTask::new(TaskKind::AlarmRepeat, ALARM_REPEAT, tx);
        (AlarmEngine::new(Box::new(backend), repeat, muted), rx)
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    // Advance one repeat period and feed the resulting fire to the alarm
    async fn next_repeat(alarm: &mut AlarmEngine, rx: &mut FireReceiver) {
        time::advance(ALARM_REPEAT).await;
        settle().await;
        while let Ok(fire) = rx.try_recv() {
            alarm.handle_fire(fire);
        }
    }

    #[test]
    fn pattern_is_fixed() {
        let freqs: Vec<f32> = ALARM_PATTERN.iter().map(|t| t.frequency_hz).collect();
        assert_eq!(freqs, vec![800.0, 600.0, 800.0]);
        assert_eq!(ALARM_PATTERN[2].delay, Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_mute_twice_restores_state() {
        let (mut alarm, _rx) = alarm_with(RecordingBackend::default(), false);
        assert!(alarm.toggle_mute());
        assert!(!alarm.toggle_mute());
        assert!(!alarm.is_muted());
    }

    #[tokio::test(start_paused = true)]
    async fn plays_pattern_every_repeat() {
        let backend = RecordingBackend::default();
        let (mut alarm, mut rx) = alarm_with(backend.clone(), false);

        alarm.play_alarm();
        assert!(alarm.is_sounding());
        assert_eq!(backend.count(), 0);

        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 3);

        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn muted_alarm_is_silent_but_sounding() {
        let backend = RecordingBackend::default();
        let (mut alarm, mut rx) = alarm_with(backend.clone(), true);

        alarm.play_alarm();
        assert!(alarm.is_sounding());

        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unmute_mid_alarm_is_not_retroactive() {
        let backend = RecordingBackend::default();
        let (mut alarm, mut rx) = alarm_with(backend.clone(), true);

        alarm.play_alarm();
        alarm.toggle_mute();
        alarm.play_alarm();

        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 0);

        // Next explicit alarm honours the new setting
        alarm.stop_alarm();
        alarm.play_alarm();
        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_silences_and_is_idempotent() {
        let backend = RecordingBackend::default();
        let (mut alarm, mut rx) = alarm_with(backend.clone(), false);

        alarm.play_alarm();
        alarm.stop_alarm();
        alarm.stop_alarm();
        assert!(!alarm.is_sounding());

        next_repeat(&mut alarm, &mut rx).await;
        assert_eq!(backend.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn mute_survives_stop() {
        let (mut alarm, _rx) = alarm_with(RecordingBackend::default(), false);
        alarm.toggle_mute();
        alarm.play_alarm();
        alarm.stop_alarm();
        assert!(alarm.is_muted());
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_is_swallowed() {
        let (tx, mut rx) = fire_channel();
        let repeat = PeriodicTask::new(TaskKind::AlarmRepeat, ALARM_REPEAT, tx);
        let mut alarm = AlarmEngine::new(Box::new(BrokenBackend), repeat, false);

        alarm.play_alarm();
        time::advance(ALARM_REPEAT).await;
        settle().await;
        let fire = rx.try_recv().unwrap();
        alarm.handle_fire(fire);
        assert!(alarm.is_sounding());
    }
}
