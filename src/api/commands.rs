//! Line-oriented command parsing

use std::str::FromStr;

use crate::{error::CommandError, state::DurationInput};

/// A user action read from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start or resume, optionally replacing the input fields first
    Start(Option<DurationInput>),
    /// Replace the input fields
    Set(DurationInput),
    Pause,
    /// Pause when running, otherwise start
    Toggle,
    Reset,
    Dismiss,
    Mute,
    Status { json: bool },
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  start [H [M [S]]]  start the countdown (or resume when paused)
  set H [M [S]]      set the hours/minutes/seconds fields
  pause              pause the countdown
  toggle | p         pause when running, otherwise start
  reset              stop and clear the countdown
  dismiss            silence the alarm and reset
  mute               toggle alarm sound
  status [json]      show the current state
  help               show this list
  quit               exit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "start" | "s" => Command::Start((!args.is_empty()).then(|| fields(&args))),
            "set" => Command::Set(fields(&args)),
            "pause" => Command::Pause,
            "toggle" | "p" | "resume" => Command::Toggle,
            "reset" | "r" => Command::Reset,
            "dismiss" | "d" => Command::Dismiss,
            "mute" | "m" => Command::Mute,
            "status" => Command::Status {
                json: args.first().is_some_and(|a| a.eq_ignore_ascii_case("json")),
            },
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn fields(args: &[&str]) -> DurationInput {
    let field = |i: usize| args.get(i).copied().unwrap_or("");
    DurationInput::from_fields(field(0), field(1), field(2))
}
