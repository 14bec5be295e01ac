use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::auth::TokenProvider;
use super::model::{KEY_ROLE, KEY_TOKEN, KEY_USER_ID, Session};
use super::storage::KeyValueStorage;
use crate::error::Result;

/// Read-only view of the in-memory session.
///
/// Cloning is cheap and every clone observes the same session. Views handed
/// out by a [`SessionWriter`] follow its changes; a view built with
/// [`SharedSession::new`] has no writer and never changes.
///
/// ```compile_fail
/// use tabshell_core::session::{Session, SessionWriter};
///
/// async fn tamper(writer: &SessionWriter) {
///     writer.reader().replace(Session::default()).await;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }
}

/// The only handle that can change the session.
///
/// Not `Clone`: whoever owns it (the credential store) is the single writer.
/// Readers get a [`SharedSession`] through [`SessionWriter::reader`].
#[derive(Debug, Default)]
pub struct SessionWriter {
    inner: Arc<RwLock<Session>>,
}

impl SessionWriter {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Restores the session persisted under the three durable keys.
    pub async fn load(storage: &dyn KeyValueStorage) -> Result<Self> {
        let session = Session {
            token: storage.get(KEY_TOKEN).await?,
            user_id: storage.get(KEY_USER_ID).await?,
            role: storage.get(KEY_ROLE).await?,
        };
        tracing::debug!(
            authenticated = session.is_authenticated(),
            "Restored session from storage"
        );
        Ok(Self::new(session))
    }

    /// A read-only view that follows this writer.
    pub fn reader(&self) -> SharedSession {
        SharedSession {
            inner: Arc::clone(&self.inner),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Swaps the whole session at once.
    pub async fn replace(&self, session: Session) {
        *self.inner.write().await = session;
    }

    /// Exclusive access for read-modify-write sequences.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Session> {
        self.inner.write().await
    }
}

#[async_trait]
impl TokenProvider for SharedSession {
    async fn current_token(&self) -> Option<String> {
        self.inner.read().await.bearer_token().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_readers_observe_replacement() {
        let writer = SessionWriter::default();
        let reader = writer.reader();
        let other = reader.clone();
        assert!(reader.current_token().await.is_none());

        writer
            .replace(Session {
                token: Some("tok".to_string()),
                user_id: Some("u1".to_string()),
                role: Some("USER".to_string()),
            })
            .await;

        assert_eq!(reader.current_token().await.as_deref(), Some("tok"));
        assert!(reader.is_authenticated().await);
        assert_eq!(other.snapshot().await, writer.snapshot().await);
    }

    #[tokio::test]
    async fn test_load_restores_durable_keys() {
        struct Fixed;

        #[async_trait]
        impl KeyValueStorage for Fixed {
            async fn get(&self, key: &str) -> Result<Option<String>> {
                Ok(match key {
                    KEY_TOKEN => Some("saved".to_string()),
                    KEY_USER_ID => Some("u9".to_string()),
                    _ => None,
                })
            }

            async fn set(&self, _key: &str, _value: &str) -> Result<()> {
                Ok(())
            }

            async fn remove(&self, _key: &str) -> Result<()> {
                Ok(())
            }
        }

        let writer = SessionWriter::load(&Fixed).await.unwrap();
        let session = writer.reader().snapshot().await;
        assert_eq!(session.bearer_token(), Some("saved"));
        assert_eq!(session.user_id(), Some("u9"));
        assert_eq!(session.role(), None);
    }

    #[tokio::test]
    async fn test_empty_token_is_not_provided() {
        let shared = SharedSession::new(Session {
            token: Some(String::new()),
            ..Session::default()
        });
        assert!(shared.current_token().await.is_none());
    }
}
