//! Response lines
//!
//! Every line the server sends to a client, newline-terminated.

pub const USAGE_HINT: &str = "Enter 'list' command or integer value\n";
pub const LIST_HEADER: &str = "List of connected clients:\n";
pub const INVALID_INPUT: &str = "Invalid input. Please enter a number or 'list'\n";

/// Greeting sent once a connection has been accepted
pub fn welcome(key: &str) -> String {
    format!("Welcome client with IP:Port {}\n", key)
}

pub fn computed_sum(sum: i64) -> String {
    format!("Computed sum: {}\n", sum)
}

/// One `list` entry
pub fn client_entry(key: &str, sum: i64) -> String {
    format!("Client with IP:Port {} and sum {}\n", key, sum)
}

/// Full `list` reply: the header followed by one line per client.
pub fn client_list(entries: &[(String, i64)]) -> String {
    let mut reply = String::from(LIST_HEADER);
    for (key, sum) in entries {
        reply.push_str(&client_entry(key, *sum));
    }
    reply
}
