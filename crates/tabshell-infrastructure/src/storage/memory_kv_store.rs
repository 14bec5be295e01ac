//! In-memory key-value storage for tests and hosts without a disk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tabshell_core::error::Result;
use tabshell_core::session::KeyValueStorage;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given entries already stored.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStorage for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn apply(&self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            match value {
                Some(value) => map.insert(key.to_string(), value.to_string()),
                None => map.remove(*key),
            };
        }
        Ok(())
    }
}
