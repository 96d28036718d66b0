//! Module `commands`
//!
//! Defines the command model for the line protocol and the parser that
//! turns a raw client line into a `Command`.

/// A command parsed from one line of client input.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Show every connected client and its sum
    List,
    /// Add a number to this client's sum
    Number(i64),
    /// Anything else, carrying the trimmed line for logging
    Invalid(String),
}

/// Outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
}

/// Full result of a command: its status and the reply to send back.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: String,
}

/// Parses a raw line received from a client.
///
/// The line is trimmed and case-folded. `list` selects the listing,
/// a base-10 integer that fits in an `i64` is a number, everything else
/// (including the empty line) is invalid.
pub fn parse_command(raw: &str) -> Command {
    let normalized = raw.trim().to_lowercase();

    if normalized == "list" {
        return Command::List;
    }

    match normalized.parse::<i64>() {
        Ok(value) => Command::Number(value),
        Err(_) => Command::Invalid(raw.trim().to_string()),
    }
}
