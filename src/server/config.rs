//! Server configuration
//!
//! Tunables loaded from defaults, an optional `sum-server.toml` in the
//! working directory, and `SUM_SERVER_*` environment variables, in that
//! order of precedence. The listening port comes from the command line.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::ServerError;

/// Address the listener binds to. Not configurable.
pub const BIND_ADDRESS: &str = "127.0.0.1";

const CONFIG_FILE: &str = "sum-server";
const ENV_PREFIX: &str = "SUM_SERVER";
const DEFAULT_MAX_LINE_LENGTH: usize = 512;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Longest accepted command line in bytes, newline included
    pub max_line_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl ServerConfig {
    /// Load configuration with file and environment overrides
    pub fn load() -> Result<Self, ServerError> {
        let settings = Config::builder()
            .set_default("max_line_length", DEFAULT_MAX_LINE_LENGTH as i64)?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.max_line_length == 0 {
            return Err(config::ConfigError::Message(
                "max_line_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Socket address string for the given port on the fixed bind address
    pub fn listen_socket(port: u16) -> String {
        format!("{}:{}", BIND_ADDRESS, port)
    }
}
