//! Sum Server
//!
//! A multi-client TCP line server. Each client sends integers that are
//! added to its own running sum, and `list` shows every connected client
//! with its current sum.

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;
pub mod utils;

pub use server::{Server, ServerConfig};
