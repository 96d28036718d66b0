//! Utility functions
//!
//! Provides argument validation and network helpers.

pub mod network;
pub mod validation;
