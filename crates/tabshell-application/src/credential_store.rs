//! Session lifecycle: restore, login, logout.

use std::sync::Arc;

use async_trait::async_trait;
use tabshell_core::error::{AuthError, Result};
use tabshell_core::event::ShellEvent;
use tabshell_core::session::{
    AuthClient, KeyValueStorage, LoginRequest, SESSION_KEYS, Session, SessionWriter,
    SharedSession, TokenProvider,
};
use tokio::sync::broadcast;

use crate::events::EventBus;

/// Source of truth for "is the user logged in".
///
/// The in-memory session and the three durable keys are always changed
/// together while holding the session's write lock, so readers never see a
/// half-applied login or logout.
pub struct CredentialStore {
    session: SessionWriter,
    storage: Arc<dyn KeyValueStorage>,
    auth: Arc<dyn AuthClient>,
    events: EventBus,
}

impl CredentialStore {
    /// Wires the store around an already-restored session.
    ///
    /// Readers of `session` (the HTTP client, the navigator) should be
    /// handed views from [`SessionWriter::reader`] before it moves in here.
    pub fn new(
        session: SessionWriter,
        storage: Arc<dyn KeyValueStorage>,
        auth: Arc<dyn AuthClient>,
        events: EventBus,
    ) -> Self {
        Self {
            session,
            storage,
            auth,
            events,
        }
    }

    /// Restores the session from `storage` and builds the store around it.
    pub async fn open(
        storage: Arc<dyn KeyValueStorage>,
        auth: Arc<dyn AuthClient>,
        events: EventBus,
    ) -> Result<Self> {
        let session = SessionWriter::load(storage.as_ref()).await?;
        Ok(Self::new(session, storage, auth, events))
    }

    /// Current in-memory session.
    pub async fn session(&self) -> Session {
        self.session.snapshot().await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.reader().is_authenticated().await
    }

    /// Read-only view that observes this store's session.
    pub fn shared_session(&self) -> SharedSession {
        self.session.reader()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.events.subscribe()
    }

    /// Exchanges credentials for a session.
    ///
    /// On any failure the in-memory session and durable storage are left
    /// exactly as they were and the collaborator's error is returned as-is.
    pub async fn login(&self, user_id: &str, password: &str) -> std::result::Result<Session, AuthError> {
        let request = LoginRequest {
            user_id: user_id.to_string(),
            password: password.to_string(),
        };

        let response = match self.auth.login(&request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::info!(user_id, error = %err, "Login failed");
                return Err(err);
            }
        };

        let session = Session::from_login(&response);
        {
            let mut current = self.session.write().await;
            // Durable first: if the write fails the in-memory session stays untouched.
            self.storage.apply(&session.to_entries()).await?;
            *current = session.clone();
        }

        tracing::info!(user_id = %response.user_id, role = %response.role, "Logged in");
        self.events.publish(ShellEvent::session_changed(&session));
        Ok(session)
    }

    /// Forgets the session locally. There is no server round-trip.
    ///
    /// Never fails: a storage error is logged and the in-memory session is
    /// cleared regardless.
    pub async fn logout(&self) {
        {
            let mut current = self.session.write().await;
            let removals: [(&str, Option<&str>); 3] = SESSION_KEYS.map(|key| (key, None));
            if let Err(err) = self.storage.apply(&removals).await {
                tracing::warn!(error = %err, "Failed to remove persisted session");
            }
            *current = Session::default();
        }

        tracing::info!("Logged out");
        self.events
            .publish(ShellEvent::session_changed(&Session::default()));
    }
}

#[async_trait]
impl TokenProvider for CredentialStore {
    async fn current_token(&self) -> Option<String> {
        self.session.reader().current_token().await
    }
}
