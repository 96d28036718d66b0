//! Line protocol
//!
//! Handles command parsing, dispatch against the registry, and the
//! client-facing response lines.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
