//! Error types
//!
//! Defines the error types for server startup and the client registry.

use std::fmt;
use std::io;

/// Errors raised while starting or running the server
#[derive(Debug)]
pub enum ServerError {
    MissingPort,
    InvalidPort(String),
    Config(config::ConfigError),
    Bind { addr: String, source: io::Error },
    Io(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::MissingPort => write!(f, "Port argument is missing"),
            ServerError::InvalidPort(p) => write!(f, "Invalid port: {}", p),
            ServerError::Config(e) => write!(f, "Configuration error: {}", e),
            ServerError::Bind { addr, source } => {
                write!(f, "Failed to bind to {}: {}", addr, source)
            }
            ServerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Config(e) => Some(e),
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(error: config::ConfigError) -> Self {
        ServerError::Config(error)
    }
}

impl From<io::Error> for ServerError {
    fn from(error: io::Error) -> Self {
        ServerError::Io(error)
    }
}

/// Client registry errors
#[derive(Debug, PartialEq)]
pub enum RegistryError {
    ClientNotFound(String),
    Overflow { key: String, sum: i64, value: i64 },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::ClientNotFound(key) => write!(f, "Client not found: {}", key),
            RegistryError::Overflow { key, sum, value } => write!(
                f,
                "Sum overflow for client {}: {} + {} does not fit",
                key, sum, value
            ),
        }
    }
}

impl std::error::Error for RegistryError {}
