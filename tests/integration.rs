use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::{sleep, timeout};

use sum_server::client::SharedRegistry;
use sum_server::{Server, ServerConfig};

const READ_TIMEOUT: Duration = Duration::from_secs(5);
const INVALID: &str = "Invalid input. Please enter a number or 'list'";

struct TestClient {
    key: String,
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: std::net::SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).await.unwrap();
        let local = stream.local_addr().unwrap();
        let key = format!("{}:{}", local.ip(), local.port());
        let (read_half, writer) = stream.into_split();
        let mut client = Self {
            key,
            reader: BufReader::new(read_half),
            writer,
        };

        let welcome = client.read_line().await;
        assert_eq!(welcome, format!("Welcome client with IP:Port {}", client.key));
        assert_eq!(client.read_line().await, "Enter 'list' command or integer value");
        client
    }

    async fn read_line(&mut self) -> String {
        let mut line = String::new();
        let n = timeout(READ_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("timed out waiting for server")
            .unwrap();
        assert!(n > 0, "server closed the connection");
        line.trim_end().to_string()
    }

    async fn send(&mut self, line: &str) -> String {
        self.writer
            .write_all(format!("{}\n", line).as_bytes())
            .await
            .unwrap();
        self.read_line().await
    }

    async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer.write_all(bytes).await.unwrap();
    }

    /// Sends `list` and returns the `expected` entry lines after the header.
    async fn list(&mut self, expected: usize) -> Vec<String> {
        assert_eq!(self.send("list").await, "List of connected clients:");

        let mut entries = Vec::with_capacity(expected);
        for _ in 0..expected {
            entries.push(self.read_line().await);
        }
        entries
    }
}

async fn start_server() -> (std::net::SocketAddr, SharedRegistry) {
    let server = Server::bind(0, ServerConfig::default()).await.unwrap();
    let addr = server.local_addr().unwrap();
    let registry = server.registry();
    tokio::spawn(server.start());
    (addr, registry)
}

async fn wait_until_removed(registry: &SharedRegistry, key: &str) {
    for _ in 0..100 {
        if registry.sum_of(key).await.is_none() {
            return;
        }
        sleep(Duration::from_millis(20)).await;
    }
    panic!("client {} was never removed from the registry", key);
}

fn entry(key: &str, sum: i64) -> String {
    format!("Client with IP:Port {} and sum {}", key, sum)
}

#[tokio::test]
async fn end_to_end_session() {
    let (addr, registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;
    assert_eq!(registry.sum_of(&client.key).await, Some(0));

    assert_eq!(client.send("10").await, "Computed sum: 10");
    assert_eq!(client.send("5").await, "Computed sum: 15");
    assert_eq!(client.list(1).await, vec![entry(&client.key, 15)]);
    assert_eq!(client.send("abc").await, INVALID);
    assert_eq!(registry.sum_of(&client.key).await, Some(15));

    let key = client.key.clone();
    drop(client);
    wait_until_removed(&registry, &key).await;
    assert!(registry.is_empty().await);
}

#[tokio::test]
async fn running_sum_matches_arithmetic_sum() {
    let (addr, _registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;

    let mut expected = 0i64;
    for value in [3, -7, 100, 0, -1, 42, 9_000_000_000] {
        expected += value;
        assert_eq!(
            client.send(&value.to_string()).await,
            format!("Computed sum: {}", expected)
        );
    }
    assert_eq!(client.send("  +8  ").await, format!("Computed sum: {}", expected + 8));
}

#[tokio::test]
async fn malformed_input_is_rejected_and_session_continues() {
    let (addr, registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;
    client.send("4").await;

    for raw in ["", "hello", "12abc", "1.5", "list please", "99999999999999999999"] {
        assert_eq!(client.send(raw).await, INVALID, "input {raw:?}");
    }
    assert_eq!(registry.sum_of(&client.key).await, Some(4));
    assert_eq!(client.send("LIST").await, "List of connected clients:");
}

#[tokio::test]
async fn overflowing_sum_is_rejected() {
    let (addr, registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(
        client.send(&i64::MAX.to_string()).await,
        format!("Computed sum: {}", i64::MAX)
    );
    assert_eq!(client.send("1").await, INVALID);
    assert_eq!(registry.sum_of(&client.key).await, Some(i64::MAX));
    assert_eq!(client.send("-1").await, format!("Computed sum: {}", i64::MAX - 1));
}

#[tokio::test]
async fn overlong_line_is_rejected() {
    let (addr, _registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;

    let long = "1".repeat(1024);
    assert_eq!(client.send(&long).await, INVALID);
    assert_eq!(client.send("2").await, "Computed sum: 2");
}

#[tokio::test]
async fn unterminated_overlong_line_is_rejected_without_buffering() {
    let (addr, registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;

    // No newline: the server must answer once the limit is passed.
    client.send_raw(&vec![b'1'; 64 * 1024]).await;
    assert_eq!(client.read_line().await, INVALID);

    // The newline ends the discarded line; the session carries on.
    client.send_raw(b"\n").await;
    assert_eq!(client.send("2").await, "Computed sum: 2");
    assert_eq!(registry.sum_of(&client.key).await, Some(2));
}

#[tokio::test]
async fn invalid_utf8_is_rejected_and_session_continues() {
    let (addr, registry) = start_server().await;
    let mut client = TestClient::connect(addr).await;

    client.send_raw(b"\xff\xfe1\n").await;
    assert_eq!(client.read_line().await, INVALID);
    assert_eq!(client.send("3").await, "Computed sum: 3");
    assert_eq!(registry.sum_of(&client.key).await, Some(3));
}

#[tokio::test]
async fn list_shows_every_client_and_drops_disconnected_ones() {
    let (addr, registry) = start_server().await;
    let mut first = TestClient::connect(addr).await;
    let second = TestClient::connect(addr).await;
    let mut third = TestClient::connect(addr).await;

    let mut expected = vec![
        entry(&first.key, 0),
        entry(&second.key, 0),
        entry(&third.key, 0),
    ];
    expected.sort();
    assert_eq!(first.list(3).await, expected);

    third.send("7").await;
    let second_key = second.key.clone();
    drop(second);
    wait_until_removed(&registry, &second_key).await;

    let mut expected = vec![entry(&first.key, 0), entry(&third.key, 7)];
    expected.sort();
    assert_eq!(first.list(2).await, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_clients_keep_separate_sums() {
    let (addr, registry) = start_server().await;

    let mut tasks = Vec::new();
    for id in 1..=8i64 {
        tasks.push(tokio::spawn(async move {
            let mut client = TestClient::connect(addr).await;
            let mut expected = 0;
            for _ in 0..50 {
                expected += id;
                assert_eq!(
                    client.send(&id.to_string()).await,
                    format!("Computed sum: {}", expected)
                );
            }
            (client, expected)
        }));
    }

    let mut clients = Vec::new();
    for task in tasks {
        clients.push(task.await.unwrap());
    }

    for (client, expected) in &clients {
        assert_eq!(registry.sum_of(&client.key).await, Some(*expected));
    }
    assert_eq!(registry.len().await, 8);
}
