//! Client registry
//!
//! Tracks every connected client by its identity key together with the
//! running sum of the numbers it has sent. A single lock guards the whole
//! map; every read and write goes through it.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::RegistryError;

/// Registry handle shared between the listener loop and all handlers
pub type SharedRegistry = Arc<ClientRegistry>;

/// Registry for tracking connected clients and their sums
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<String, i64>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an empty registry behind a shared handle.
    pub fn shared() -> SharedRegistry {
        Arc::new(Self::new())
    }

    /// Registers a freshly accepted client with a sum of 0.
    pub async fn register(&self, key: &str) {
        let mut clients = self.clients.lock().await;
        clients.insert(key.to_string(), 0);
    }

    /// Adds `value` to the client's sum and returns the new total.
    ///
    /// The read-modify-write happens under the registry lock, so concurrent
    /// additions are never lost. On overflow the sum is left unchanged.
    pub async fn add(&self, key: &str, value: i64) -> Result<i64, RegistryError> {
        let mut clients = self.clients.lock().await;
        let sum = clients
            .get_mut(key)
            .ok_or_else(|| RegistryError::ClientNotFound(key.to_string()))?;

        *sum = sum.checked_add(value).ok_or(RegistryError::Overflow {
            key: key.to_string(),
            sum: *sum,
            value,
        })?;

        Ok(*sum)
    }

    /// Copies every entry while holding the lock, ordered by key.
    pub async fn snapshot(&self) -> Vec<(String, i64)> {
        let clients = self.clients.lock().await;
        let mut entries: Vec<(String, i64)> = clients
            .iter()
            .map(|(key, sum)| (key.clone(), *sum))
            .collect();
        drop(clients);

        entries.sort();
        entries
    }

    pub async fn remove(&self, key: &str) -> Option<i64> {
        self.clients.lock().await.remove(key)
    }

    pub async fn sum_of(&self, key: &str) -> Option<i64> {
        self.clients.lock().await.get(key).copied()
    }

    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }
}
