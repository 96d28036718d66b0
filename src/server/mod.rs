//! Server core functionality
//!
//! Contains the listener loop and the server configuration.

pub mod config;
pub mod core;

pub use self::config::ServerConfig;
pub use self::core::Server;
