//! Terminal readout task
//!
//! Redraws a single status line whenever a new snapshot is published, and
//! prints one-off cues for validation failures and completion.

use std::io::{self, Write};

use tokio::sync::{
    broadcast::{self, error::RecvError},
    watch,
};
use tracing::{debug, info, warn};

use crate::{
    display::{format_hms, progress_bar, window_title, PROGRESS_WIDTH},
    events::TimerEvent,
    state::{TimerMode, TimerSnapshot},
};

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Status label shown next to the readout
pub fn status_label(mode: TimerMode) -> &'static str {
    match mode {
        TimerMode::Idle => "Ready",
        TimerMode::Running => "Running",
        TimerMode::Paused => "Paused",
        TimerMode::Completed => "Time's up!",
    }
}

/// Writes the live readout to a terminal-like sink
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
    set_title: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, set_title: bool) -> Self {
        Self { out, set_title }
    }

    /// Redraw the status line for `snapshot`
    pub fn render(&mut self, snapshot: &TimerSnapshot) -> io::Result<()> {
        if self.set_title {
            write!(self.out, "\x1b]0;{}\x07", window_title(snapshot.remaining_seconds))?;
        }
        write!(
            self.out,
            "{}  {}  {}  {}",
            CLEAR_LINE,
            format_hms(snapshot.remaining_seconds),
            progress_bar(snapshot.progress(), PROGRESS_WIDTH),
            status_label(snapshot.mode),
        )?;
        self.out.flush()
    }

    /// Print a message above the status line
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}{}", CLEAR_LINE, text)?;
        self.out.flush()
    }

    /// Attention cue for a refused start
    pub fn validation_cue(&mut self) -> io::Result<()> {
        write!(self.out, "\x07")?;
        self.message("Enter a duration greater than zero (e.g. `start 0 5 0`)")
    }

    /// Alarm banner on completion
    pub fn alarm_banner(&mut self) -> io::Result<()> {
        self.message("*** Time's up! Type `dismiss` to silence the alarm ***")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Background task that keeps the terminal readout current
pub async fn render_task(
    mut events: broadcast::Receiver<TimerEvent>,
    mut snapshots: watch::Receiver<TimerSnapshot>,
    set_title: bool,
) {
    info!("Starting render task");
    let mut renderer = Renderer::new(io::stdout(), set_title);

    let initial = *snapshots.borrow_and_update();
    if let Err(e) = renderer.render(&initial) {
        warn!("Failed to draw readout: {}", e);
    }

    loop {
        let result = tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    debug!("Snapshot channel closed, stopping render task");
                    break;
                }
                let snapshot = *snapshots.borrow_and_update();
                renderer.render(&snapshot)
            }
            event = events.recv() => match event {
                Ok(TimerEvent::ValidationFailure) => redraw_after(&mut renderer, &snapshots, Renderer::validation_cue),
                Ok(TimerEvent::Complete) => redraw_after(&mut renderer, &snapshots, Renderer::alarm_banner),
                Ok(_) => Ok(()),
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Render task skipped {} timer events", skipped);
                    Ok(())
                }
                Err(RecvError::Closed) => {
                    debug!("Event bus closed, stopping render task");
                    break;
                }
            },
        };

        if let Err(e) = result {
            warn!("Failed to draw readout: {}", e);
        }
    }
}

fn redraw_after<W: Write>(
    renderer: &mut Renderer<W>,
    snapshots: &watch::Receiver<TimerSnapshot>,
    cue: fn(&mut Renderer<W>) -> io::Result<()>,
) -> io::Result<()> {
    cue(renderer)?;
    let snapshot = *snapshots.borrow();
    renderer.render(&snapshot)
}
