//! ChronoPulse - a terminal countdown timer
//!
//! This is the main entry point for the chronopulse application.

use std::io::{self, Write};

use tracing::{debug, info, warn};

use chronopulse::{
    api::{command_lines, handle_command, Command, CommandOutcome},
    config::{Config, SoundMode},
    engine::{AlarmEngine, TimerEngine, ALARM_REPEAT, TICK_PERIOD},
    events::EventBus,
    services::{BellBackend, DesktopNotifier, DisabledNotifier, SilentBackend, ToneBackend},
    state::AppState,
    tasks::{fire_channel, notification_task, render::Renderer, render_task, PeriodicTask, TaskKind},
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the readout
    tracing_subscriber::fmt()
        .with_env_filter(format!("chronopulse={}", config.log_level()))
        .with_writer(io::stderr)
        .init();

    info!("Starting chronopulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let bus = EventBus::new();
    let (fire_tx, mut fire_rx) = fire_channel();

    let alarm = AlarmEngine::new(
        tone_backend(config.sound),
        PeriodicTask::new(TaskKind::AlarmRepeat, ALARM_REPEAT, fire_tx.clone()),
        config.muted,
    );
    let timer = TimerEngine::new(
        alarm,
        PeriodicTask::new(TaskKind::Tick, TICK_PERIOD, fire_tx),
        bus.clone(),
    );
    let mut state = AppState::new(timer, config.initial_input());

    // Presentation and notification only ever see events
    tokio::spawn(render_task(bus.subscribe(), bus.watch(), !config.no_title));
    if config.no_notify {
        tokio::spawn(notification_task(bus.subscribe(), DisabledNotifier));
    } else {
        tokio::spawn(notification_task(bus.subscribe(), DesktopNotifier::new()));
    }

    let mut messages = Renderer::new(io::stdout(), false);
    if config.start {
        handle_command(&mut state, Command::Start(None));
    }

    let mut lines = command_lines();
    let mut stdin_open = true;
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(fire) = fire_rx.recv() => {
                state.dispatch_fire(fire);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => {
                    let outcome = match line.parse::<Command>() {
                        Ok(command) => handle_command(&mut state, command),
                        Err(e) => CommandOutcome::Message(e.to_string()),
                    };
                    match outcome {
                        CommandOutcome::Quit => break,
                        CommandOutcome::Message(text) => {
                            if let Err(e) = messages.message(&text) {
                                warn!("Failed to print message: {}", e);
                            }
                            // Bring the status line back under the message
                            if let Err(e) = messages.render(&state.timer.snapshot()) {
                                warn!("Failed to draw readout: {}", e);
                            }
                        }
                        CommandOutcome::Silent => {}
                    }
                }
                Ok(None) => {
                    info!("stdin closed, countdown continues until interrupted");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("Failed to read command: {}", e);
                    stdin_open = false;
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    // Silence any alarm before leaving
    state.timer.reset();
    let mut stdout = io::stdout();
    writeln!(stdout)?;
    stdout.flush()?;
    info!("Shutdown complete");

    // A pending stdin read cannot be cancelled and would hold up runtime shutdown
    std::process::exit(0)
}

/// Pick the tone backend for the configured sound mode
fn tone_backend(mode: SoundMode) -> Box<dyn ToneBackend> {
    match mode {
        SoundMode::Bell => Box::new(BellBackend),
        SoundMode::None => Box::new(SilentBackend),
        SoundMode::Synth => synth_backend(),
    }
}

#[cfg(feature = "audio")]
fn synth_backend() -> Box<dyn ToneBackend> {
    match chronopulse::services::audio::SynthBackend::probe() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            warn!("{}, falling back to terminal bell", e);
            Box::new(BellBackend)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn synth_backend() -> Box<dyn ToneBackend> {
    warn!("Built without the `audio` feature, falling back to terminal bell");
    Box::new(BellBackend)
}
