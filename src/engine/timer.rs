//! Countdown state machine
//!
//! ```text
//!          start (total > 0)          tick (remaining == 0)
//!  Idle ─────────────────────► Running ─────────────────────► Completed
//!   ▲                          │    ▲                             │
//!   │                    pause │    │ start                       │
//!   │                          ▼    │                             │
//!   │                          Paused                             │
//!   └──────────── reset (any state) / dismiss_alarm ──────────────┘
//! ```
//!
//! The engine never talks to the terminal or the notification service. It
//! publishes [`TimerEvent`]s and snapshots on an [`EventBus`] and drives its
//! alarm through the [`AlarmControl`] seam.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::alarm::{AlarmControl, AlarmEngine};
use crate::{
    error::ValidationError,
    events::{EventBus, TimerEvent},
    state::{DurationInput, TimerMode, TimerSnapshot},
    tasks::periodic::{Fire, PeriodicTask},
};

/// Countdown tick period
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct TimerEngine<A: AlarmControl = AlarmEngine> {
    total_duration_seconds: u64,
    remaining_seconds: u64,
    mode: TimerMode,
    ticker: PeriodicTask,
    alarm: A,
    bus: EventBus,
}

impl<A: AlarmControl> TimerEngine<A> {
    /// Create an idle engine with zero durations
    pub fn new(alarm: A, ticker: PeriodicTask, bus: EventBus) -> Self {
        Self {
            total_duration_seconds: 0,
            remaining_seconds: 0,
            mode: TimerMode::Idle,
            ticker,
            alarm,
            bus,
        }
    }

    /// Start a new run from Idle, or resume from Paused.
    ///
    /// From Idle the duration comes from `input`; a zero duration is rejected
    /// and also reported as [`TimerEvent::ValidationFailure`]. From Paused the
    /// input is ignored and the remaining time is kept. Running and Completed
    /// are left untouched.
    pub fn start(&mut self, input: &DurationInput) -> Result<(), ValidationError> {
        match self.mode {
            TimerMode::Running => {
                debug!("Start ignored, timer already running");
                return Ok(());
            }
            TimerMode::Completed => {
                debug!("Start ignored, alarm must be dismissed first");
                return Ok(());
            }
            TimerMode::Paused => {
                info!("Resuming timer with {}s remaining", self.remaining_seconds);
            }
            TimerMode::Idle => {
                let total = input.total_seconds();
                if total == 0 {
                    warn!("Refusing to start a zero-length timer");
                    self.bus.emit(TimerEvent::ValidationFailure);
                    return Err(ValidationError::ZeroDuration);
                }
                info!("Starting timer for {}s", total);
                self.total_duration_seconds = total;
                self.remaining_seconds = total;
            }
        }

        self.ticker.arm();
        self.set_mode(TimerMode::Running);
        self.publish();
        Ok(())
    }

    /// Apply one elapsed second. Ignored unless Running.
    pub fn tick(&mut self) {
        if self.mode != TimerMode::Running {
            debug!("Tick ignored in {} mode", self.mode);
            return;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.complete();
            return;
        }

        self.bus.emit(TimerEvent::Tick {
            remaining_seconds: self.remaining_seconds,
            progress: self.snapshot().progress(),
        });
        self.publish();
    }

    /// Handle a tick fire from the driver loop, dropping stale ones
    pub fn handle_fire(&mut self, fire: Fire) {
        if !self.ticker.accepts(&fire) {
            debug!("Ignoring stale tick fire {:?}", fire);
            return;
        }
        self.tick();
    }

    /// Pause a running countdown. No-op in any other mode.
    pub fn pause(&mut self) {
        if self.mode != TimerMode::Running {
            return;
        }
        self.ticker.disarm();
        info!("Timer paused with {}s remaining", self.remaining_seconds);
        self.set_mode(TimerMode::Paused);
        self.publish();
    }

    /// Pause when running, otherwise start with `input`
    pub fn toggle(&mut self, input: &DurationInput) -> Result<(), ValidationError> {
        if self.mode == TimerMode::Running {
            self.pause();
            Ok(())
        } else {
            self.start(input)
        }
    }

    /// Return to Idle from any mode and silence the alarm
    pub fn reset(&mut self) {
        self.ticker.disarm();
        self.total_duration_seconds = 0;
        self.remaining_seconds = 0;
        self.set_mode(TimerMode::Idle);
        self.alarm.stop_alarm();
        self.publish();
    }

    /// Silence the alarm and reset
    pub fn dismiss_alarm(&mut self) {
        info!("Alarm dismissed");
        self.alarm.stop_alarm();
        self.reset();
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            remaining_seconds: self.remaining_seconds,
            total_duration_seconds: self.total_duration_seconds,
            mode: self.mode,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    pub fn alarm_mut(&mut self) -> &mut A {
        &mut self.alarm
    }

    fn complete(&mut self) {
        self.ticker.disarm();
        self.remaining_seconds = 0;
        info!("Timer complete");
        self.set_mode(TimerMode::Completed);
        self.alarm.play_alarm();
        self.bus.emit(TimerEvent::Complete);
        self.publish();
    }

    fn set_mode(&mut self, mode: TimerMode) {
        if self.mode == mode {
            return;
        }
        debug!("Timer mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.bus.emit(TimerEvent::StateChange(mode));
    }

    fn publish(&self) {
        self.bus.publish(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::periodic::{fire_channel, FireReceiver, TaskKind};
    use tokio::{sync::broadcast, time};

    /// Counts alarm calls instead of making noise
    #[derive(Debug, Default)]
    struct CountingAlarm {
        plays: usize,
        stops: usize,
    }

    impl AlarmControl for CountingAlarm {
        fn play_alarm(&mut self) {
            self.plays += 1;
        }

        fn stop_alarm(&mut self) {
            self.stops += 1;
        }
    }

    fn engine() -> (TimerEngine<CountingAlarm>, FireReceiver, broadcast::Receiver<TimerEvent>) {
        let (tx, rx) = fire_channel();
        let bus = EventBus::new();
        let events = bus.subscribe();
        let ticker = PeriodicTask::new(TaskKind::Tick, TICK_PERIOD, tx);
        (TimerEngine::new(CountingAlarm::default(), ticker, bus), rx, events)
    }

    fn drain(events: &mut broadcast::Receiver<TimerEvent>) -> Vec<TimerEvent> {
        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn start_sets_durations_and_runs() {
        let (mut timer, _rx, mut events) = engine();
        for (h, m, s) in [(0, 0, 1), (1, 1, 1), (0, 90, 0), (2, 0, 75)] {
            timer.reset();
            drain(&mut events);

            timer.start(&DurationInput::new(h, m, s)).unwrap();

            let expected = h * 3600 + m * 60 + s;
            let snapshot = timer.snapshot();
            assert_eq!(snapshot.total_duration_seconds, expected);
            assert_eq!(snapshot.remaining_seconds, expected);
            assert_eq!(snapshot.mode, TimerMode::Running);
            assert!(timer.is_ticking());
            assert_eq!(drain(&mut events), vec![TimerEvent::StateChange(TimerMode::Running)]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_is_rejected() {
        let (mut timer, _rx, mut events) = engine();

        let result = timer.start(&DurationInput::default());

        assert_eq!(result, Err(ValidationError::ZeroDuration));
        assert_eq!(timer.mode(), TimerMode::Idle);
        assert!(!timer.is_ticking());
        assert_eq!(drain(&mut events), vec![TimerEvent::ValidationFailure]);
    }

    #[tokio::test(start_paused = true)]
    async fn ticking_to_zero_completes_once() {
        let (mut timer, _rx, mut events) = engine();
        timer.start(&DurationInput::new(0, 0, 3)).unwrap();
        drain(&mut events);

        timer.tick();
        timer.tick();
        assert_eq!(timer.mode(), TimerMode::Running);
        timer.tick();

        assert_eq!(timer.mode(), TimerMode::Completed);
        assert_eq!(timer.snapshot().remaining_seconds, 0);
        assert!(!timer.is_ticking());
        assert_eq!(timer.alarm().plays, 1);

        // Stray ticks after completion change nothing
        timer.tick();
        assert_eq!(timer.alarm().plays, 1);

        assert_eq!(
            drain(&mut events),
            vec![
                TimerEvent::Tick { remaining_seconds: 2, progress: 2.0 / 3.0 },
                TimerEvent::Tick { remaining_seconds: 1, progress: 1.0 / 3.0 },
                TimerEvent::StateChange(TimerMode::Completed),
                TimerEvent::Complete,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn pause_then_resume_keeps_remaining() {
        let (mut timer, _rx, _events) = engine();
        timer.start(&DurationInput::new(0, 1, 0)).unwrap();
        timer.tick();
        timer.tick();

        timer.pause();
        assert_eq!(timer.mode(), TimerMode::Paused);
        assert!(!timer.is_ticking());
        timer.tick();
        assert_eq!(timer.snapshot().remaining_seconds, 58);

        // Inputs are ignored on resume
        timer.start(&DurationInput::new(5, 0, 0)).unwrap();
        assert_eq!(timer.mode(), TimerMode::Running);
        assert_eq!(timer.snapshot().remaining_seconds, 58);
        assert_eq!(timer.snapshot().total_duration_seconds, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_outside_running_is_noop() {
        let (mut timer, _rx, mut events) = engine();
        timer.pause();
        assert_eq!(timer.mode(), TimerMode::Idle);
        assert!(drain(&mut events).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn start_while_running_is_idempotent() {
        let (mut timer, _rx, _events) = engine();
        timer.start(&DurationInput::new(0, 0, 10)).unwrap();
        timer.tick();
        timer.start(&DurationInput::new(0, 0, 99)).unwrap();
        assert_eq!(timer.snapshot().remaining_seconds, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn start_after_completion_is_ignored() {
        let (mut timer, _rx, _events) = engine();
        timer.start(&DurationInput::new(0, 0, 1)).unwrap();
        timer.tick();

        timer.start(&DurationInput::new(0, 0, 30)).unwrap();
        assert_eq!(timer.mode(), TimerMode::Completed);
        assert!(!timer.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_from_every_mode_returns_to_idle() {
        let (mut timer, _rx, _events) = engine();
        let input = DurationInput::new(0, 0, 2);

        let mut setups: Vec<fn(&mut TimerEngine<CountingAlarm>, &DurationInput)> = Vec::new();
        setups.push(|_, _| {});
        setups.push(|t, i| t.start(i).unwrap());
        setups.push(|t, i| {
            t.start(i).unwrap();
            t.pause();
        });
        setups.push(|t, i| {
            t.start(i).unwrap();
            t.tick();
            t.tick();
        });

        for (n, setup) in setups.into_iter().enumerate() {
            setup(&mut timer, &input);
            let stops_before = timer.alarm().stops;

            timer.reset();

            let snapshot = timer.snapshot();
            assert_eq!(snapshot.mode, TimerMode::Idle, "setup {}", n);
            assert_eq!(snapshot.total_duration_seconds, 0);
            assert_eq!(snapshot.remaining_seconds, 0);
            assert!(!timer.is_ticking());
            assert_eq!(timer.alarm().stops, stops_before + 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_stops_alarm_and_resets() {
        let (mut timer, _rx, _events) = engine();
        timer.start(&DurationInput::new(0, 0, 1)).unwrap();
        timer.tick();

        timer.dismiss_alarm();

        assert_eq!(timer.mode(), TimerMode::Idle);
        assert!(timer.alarm().stops >= 1);
        assert_eq!(timer.snapshot(), TimerSnapshot::new());
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_pauses_and_resumes() {
        let (mut timer, _rx, _events) = engine();
        let input = DurationInput::new(0, 0, 5);

        timer.toggle(&input).unwrap();
        assert_eq!(timer.mode(), TimerMode::Running);
        timer.toggle(&input).unwrap();
        assert_eq!(timer.mode(), TimerMode::Paused);
        timer.toggle(&input).unwrap();
        assert_eq!(timer.mode(), TimerMode::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn fires_drive_the_countdown() {
        let (mut timer, mut rx, _events) = engine();
        timer.start(&DurationInput::new(0, 0, 2)).unwrap();

        for _ in 0..2 {
            time::advance(TICK_PERIOD).await;
            for _ in 0..5 {
                tokio::task::yield_now().await;
            }
            while let Ok(fire) = rx.try_recv() {
                timer.handle_fire(fire);
            }
        }

        assert_eq!(timer.mode(), TimerMode::Completed);
        assert_eq!(timer.alarm().plays, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fire_queued_before_pause_is_dropped() {
        let (mut timer, mut rx, _events) = engine();
        timer.start(&DurationInput::new(0, 0, 10)).unwrap();
        time::advance(TICK_PERIOD).await;
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }

        timer.pause();
        let fire = rx.try_recv().unwrap();
        timer.handle_fire(fire);

        assert_eq!(timer.snapshot().remaining_seconds, 10);
    }
}
