//! Command handlers
//!
//! Executes a parsed command against the shared registry on behalf of one
//! client and produces the reply for it.

use log::{error, info, warn};

use crate::client::ClientRegistry;
use crate::error::RegistryError;
use crate::protocol::responses;
use crate::protocol::{Command, CommandResult, CommandStatus};

/// Dispatches a command sent by the client identified by `key`.
pub async fn handle_command(
    key: &str,
    command: &Command,
    registry: &ClientRegistry,
) -> CommandResult {
    match command {
        Command::List => handle_cmd_list(registry).await,
        Command::Number(value) => handle_cmd_number(key, *value, registry).await,
        Command::Invalid(raw) => handle_cmd_invalid(key, raw),
    }
}

async fn handle_cmd_list(registry: &ClientRegistry) -> CommandResult {
    let entries = registry.snapshot().await;

    CommandResult {
        status: CommandStatus::Success,
        message: responses::client_list(&entries),
    }
}

async fn handle_cmd_number(key: &str, value: i64, registry: &ClientRegistry) -> CommandResult {
    info!("Client with IP:Port {} entered value: {}", key, value);

    match registry.add(key, value).await {
        Ok(sum) => CommandResult {
            status: CommandStatus::Success,
            message: responses::computed_sum(sum),
        },
        Err(e) => {
            match e {
                RegistryError::Overflow { .. } => warn!("{}", e),
                RegistryError::ClientNotFound(_) => error!("{}", e),
            }
            CommandResult {
                status: CommandStatus::Failure(e.to_string()),
                message: responses::INVALID_INPUT.to_string(),
            }
        }
    }
}

fn handle_cmd_invalid(key: &str, raw: &str) -> CommandResult {
    info!("Client with IP:Port {} entered not correct value", key);

    CommandResult {
        status: CommandStatus::Failure(format!("Invalid input: {:?}", raw)),
        message: responses::INVALID_INPUT.to_string(),
    }
}
