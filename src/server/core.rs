use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::client::{ClientRegistry, SharedRegistry, handle_client};
use crate::error::ServerError;
use crate::server::config::ServerConfig;
use crate::utils::network::client_key;

const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

pub struct Server {
    client_registry: SharedRegistry,
    listener: TcpListener,
    config: ServerConfig,
}

impl Server {
    /// Binds the listener on the loopback address and the given port.
    pub async fn bind(port: u16, config: ServerConfig) -> Result<Self, ServerError> {
        let socket = ServerConfig::listen_socket(port);

        let listener = TcpListener::bind(&socket)
            .await
            .map_err(|source| ServerError::Bind {
                addr: socket.clone(),
                source,
            })?;
        info!("Server bound to {}", socket);

        Ok(Self {
            client_registry: ClientRegistry::shared(),
            listener,
            config,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.client_registry)
    }

    /// Accepts connections forever, spawning one handler task per client.
    pub async fn start(self) {
        match self.listener.local_addr() {
            Ok(addr) => info!("Socket server is started on port: {}", addr.port()),
            Err(_) => info!("Socket server is started"),
        }

        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let key = client_key(&stream);
                    self.client_registry.register(&key).await;
                    info!("Client with IP:Port {} is connected", key);

                    let client_registry = Arc::clone(&self.client_registry);
                    let config = self.config.clone();

                    // Spawn a task for each client so accept loop doesn't block
                    tokio::spawn(handle_client(stream, key, client_registry, config));
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            }
        }
    }
}
