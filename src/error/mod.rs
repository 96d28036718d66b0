//! Error handling
//!
//! Defines error types for the server.

pub mod types;

pub use types::*;
