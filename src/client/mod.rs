//! Client management
//!
//! Holds the shared registry of connected clients and the per-connection
//! session handler.

pub mod handler;
pub mod registry;

pub use handler::handle_client;
pub use registry::{ClientRegistry, SharedRegistry};
