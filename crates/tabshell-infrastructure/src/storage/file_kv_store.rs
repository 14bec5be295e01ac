//! File-backed key-value storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tabshell_core::error::{Result, ShellError};
use tabshell_core::session::KeyValueStorage;
use tokio::sync::Mutex;

use super::atomic_toml::AtomicTomlFile;

type Entries = BTreeMap<String, String>;

/// Key-value storage persisted as a flat TOML table.
///
/// The whole table is cached in memory after `open`; every write goes through
/// a locked read-modify-write of the file on a blocking thread and then
/// refreshes the cache with what was written.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    file: AtomicTomlFile<Entries>,
    cache: Arc<Mutex<Entries>>,
}

impl FileKeyValueStore {
    /// Opens (or lazily creates) the store at `path`.
    pub async fn open(path: PathBuf) -> Result<Self> {
        let file = AtomicTomlFile::<Entries>::new(path);
        let loader = file.clone();
        let initial = tokio::task::spawn_blocking(move || loader.load())
            .await
            .map_err(|e| ShellError::internal(format!("Failed to join task: {}", e)))??
            .unwrap_or_default();

        tracing::debug!(path = %file.path().display(), keys = initial.len(), "Opened key-value store");

        Ok(Self {
            file,
            cache: Arc::new(Mutex::new(initial)),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn write_entries(&self, entries: Vec<(String, Option<String>)>) -> Result<()> {
        // Held across the disk write so concurrent writers cannot interleave.
        let mut cache = self.cache.lock().await;

        let file = self.file.clone();
        let written = tokio::task::spawn_blocking(move || {
            file.update(Entries::new(), |data| {
                for (key, value) in entries {
                    match value {
                        Some(value) => data.insert(key, value),
                        None => data.remove(&key),
                    };
                }
                Ok(())
            })
        })
        .await
        .map_err(|e| ShellError::internal(format!("Failed to join task: {}", e)))?
        .map_err(|e| ShellError::storage(format!("Failed to write {}: {}", self.path().display(), e)))?;

        *cache = written;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write_entries(vec![(key.to_string(), Some(value.to_string()))])
            .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.write_entries(vec![(key.to_string(), None)]).await
    }

    /// All entries land in a single file replacement.
    async fn apply(&self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        let owned = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.map(str::to_string)))
            .collect();
        self.write_entries(owned).await
    }
}
