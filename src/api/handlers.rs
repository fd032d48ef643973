//! Command handlers

use tracing::{error, info};

use super::{
    commands::{Command, HELP},
    responses::{CommandOutcome, StatusReport},
};
use crate::state::AppState;

/// Apply one command to the application state
pub fn handle_command(state: &mut AppState, command: Command) -> CommandOutcome {
    match command {
        Command::Start(fields) => {
            if let Some(fields) = fields {
                state.inputs = fields;
            }
            state.record_action("start");
            // A refused start is already shown through the ValidationFailure event
            let _ = state.timer.start(&state.inputs);
            CommandOutcome::Silent
        }
        Command::Set(fields) => {
            state.inputs = fields;
            state.record_action("set");
            CommandOutcome::Message(format!(
                "Duration set to {}h {}m {}s",
                fields.hours, fields.minutes, fields.seconds
            ))
        }
        Command::Pause => {
            state.record_action("pause");
            state.timer.pause();
            CommandOutcome::Silent
        }
        Command::Toggle => {
            state.record_action("toggle");
            let _ = state.timer.toggle(&state.inputs);
            CommandOutcome::Silent
        }
        Command::Reset => {
            state.record_action("reset");
            state.timer.reset();
            CommandOutcome::Silent
        }
        Command::Dismiss => {
            state.record_action("dismiss");
            state.timer.dismiss_alarm();
            CommandOutcome::Silent
        }
        Command::Mute => {
            state.record_action("mute");
            let muted = state.timer.alarm_mut().toggle_mute();
            CommandOutcome::Message(if muted { "Sound off" } else { "Sound on" }.to_string())
        }
        Command::Status { json } => {
            let report = StatusReport::from_state(state);
            if !json {
                return CommandOutcome::Message(report.summary());
            }
            match serde_json::to_string_pretty(&report) {
                Ok(text) => CommandOutcome::Message(text),
                Err(e) => {
                    error!("Failed to serialize status: {}", e);
                    CommandOutcome::Message(report.summary())
                }
            }
        }
        Command::Help => CommandOutcome::Message(HELP.to_string()),
        Command::Quit => {
            info!("Quit requested");
            CommandOutcome::Quit
        }
    }
}
