//! Network utilities
//!
//! Derives the identity key a client is tracked under.

use std::net::SocketAddr;
use tokio::net::TcpStream;

/// Key used when the remote endpoint cannot be determined
pub const UNKNOWN_CLIENT_KEY: &str = "empty";

/// Returns `"<address>:<port>"` for the remote end of `stream`.
pub fn client_key(stream: &TcpStream) -> String {
    format_client_key(stream.peer_addr().ok())
}

pub fn format_client_key(addr: Option<SocketAddr>) -> String {
    match addr {
        Some(addr) => format!("{}:{}", addr.ip(), addr.port()),
        None => UNKNOWN_CLIENT_KEY.to_string(),
    }
}
