//! Input validation utilities
//!
//! Validates the command-line arguments of the server binary.

use crate::error::ServerError;

/// Parses the listening port argument.
///
/// Accepts an integer in `1..=65535`; anything else, including a missing
/// argument, is rejected.
pub fn parse_port(arg: Option<&str>) -> Result<u16, ServerError> {
    let raw = arg.ok_or(ServerError::MissingPort)?;

    match raw.parse::<u16>() {
        Ok(0) | Err(_) => Err(ServerError::InvalidPort(raw.to_string())),
        Ok(port) => Ok(port),
    }
}
