//! Configuration and CLI argument handling

use clap::{Parser, ValueEnum};

use crate::state::DurationInput;

/// How alarm tones are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SoundMode {
    /// Terminal bell
    Bell,
    /// Synthesized tones on the audio device (needs the `audio` feature)
    Synth,
    /// No sound
    None,
}

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "chronopulse")]
#[command(about = "A terminal countdown timer with an alarm and desktop notifications")]
#[command(version)]
pub struct Config {
    /// Initial hours field
    #[arg(long, default_value = "0")]
    pub hours: u64,

    /// Initial minutes field
    #[arg(short, long, default_value = "0")]
    pub minutes: u64,

    /// Initial seconds field
    #[arg(short, long, default_value = "0")]
    pub seconds: u64,

    /// Start the countdown immediately
    #[arg(long)]
    pub start: bool,

    /// Start with the alarm muted
    #[arg(long)]
    pub muted: bool,

    /// Alarm sound output
    #[arg(long, value_enum, default_value = "bell")]
    pub sound: SoundMode,

    /// Do not show a desktop notification on completion
    #[arg(long)]
    pub no_notify: bool,

    /// Do not update the terminal title
    #[arg(long)]
    pub no_title: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Initial contents of the duration fields
    pub fn initial_input(&self) -> DurationInput {
        DurationInput::new(self.hours, self.minutes, self.seconds)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        // The readout owns stdout, so stay quiet unless asked
        if self.verbose { "debug" } else { "warn" }
    }
}
