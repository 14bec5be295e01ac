//! Durable key-value storage trait.

use async_trait::async_trait;

use crate::error::Result;

/// String key-value store that survives process restarts.
///
/// Values are small fixed-key strings, so implementations may do their I/O
/// synchronously as long as they do not hold up the async runtime.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Applies several writes as one unit: `Some` sets, `None` removes.
    ///
    /// The default applies them one by one; file-backed stores override it so
    /// that either every entry lands or none does.
    async fn apply(&self, entries: &[(&str, Option<&str>)]) -> Result<()> {
        for (key, value) in entries {
            match value {
                Some(value) => self.set(key, value).await?,
                None => self.remove(key).await?,
            }
        }
        Ok(())
    }
}
