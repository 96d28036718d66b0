use log::{debug, error, info, warn};
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::client::SharedRegistry;
use crate::protocol::responses;
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::server::config::ServerConfig;

/// Runs one client's session and tears it down afterwards.
///
/// - Greets the client with its identity key and a usage hint.
/// - Reads newline-terminated commands until the client closes the
///   stream or an I/O error occurs.
/// - On every exit path closes the connection, then removes the client
///   from the registry.
pub async fn handle_client(
    stream: TcpStream,
    key: String,
    registry: SharedRegistry,
    config: ServerConfig,
) {
    match run_session(stream, &key, &registry, &config).await {
        Ok(()) => info!("Connection closed by client {}", key),
        Err(e) => error!("Session with client {} failed: {}", key, e),
    }

    // The stream was moved into the session and is already closed here.
    if registry.remove(&key).await.is_none() {
        warn!("Client {} was not registered at teardown", key);
    }
    info!("Client with IP:Port {} is disconnected", key);
}

async fn run_session(
    stream: TcpStream,
    key: &str,
    registry: &SharedRegistry,
    config: &ServerConfig,
) -> io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    write_half.write_all(responses::welcome(key).as_bytes()).await?;
    write_half.write_all(responses::USAGE_HINT.as_bytes()).await?;

    let limit = config.max_line_length;

    loop {
        buf.clear();
        // One byte past the limit is enough to tell an overlong line apart.
        let n = (&mut reader)
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if n == 0 {
            return Ok(());
        }

        if buf.len() > limit {
            warn!("Client {} sent a line over the {} byte limit", key, limit);
            write_half.write_all(responses::INVALID_INPUT.as_bytes()).await?;
            if buf.last() != Some(&b'\n') {
                discard_line(&mut reader, &mut buf, limit).await?;
            }
            continue;
        }

        let line = String::from_utf8_lossy(&buf);
        let command = parse_command(&line);
        let result = handle_command(key, &command, registry).await;

        if let CommandStatus::Failure(reason) = &result.status {
            debug!("Rejected input from {}: {}", key, reason);
        }

        write_half.write_all(result.message.as_bytes()).await?;
    }
}

/// Skips input up to and including the next newline, in chunks of at most
/// `chunk` bytes. Stops early at end of stream.
async fn discard_line<R>(reader: &mut R, buf: &mut Vec<u8>, chunk: usize) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        buf.clear();
        let n = (&mut *reader)
            .take(chunk as u64)
            .read_until(b'\n', buf)
            .await?;
        if n == 0 || buf.last() == Some(&b'\n') {
            return Ok(());
        }
    }
}
