//! Command surface module
//!
//! Commands arrive as lines on stdin and are applied to the application state.

pub mod commands;
pub mod handlers;
pub mod responses;

use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};

pub use commands::Command;
pub use handlers::handle_command;
pub use responses::{CommandOutcome, StatusReport};

/// Line reader over stdin
pub fn command_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(io::stdin()).lines()
}
