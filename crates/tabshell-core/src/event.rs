//! Change notifications published to the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::tab::TabSnapshot;

/// A state change observers may want to re-render for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellEvent {
    /// Login or logout replaced the session.
    SessionChanged {
        authenticated: bool,
        user_id: Option<String>,
        role: Option<String>,
    },
    /// The tab list or the active tab changed.
    TabsChanged { snapshot: TabSnapshot },
    /// A navigation settled on `path` (after any redirects).
    Navigated {
        requested: String,
        path: String,
        view: String,
        at: DateTime<Utc>,
    },
}

impl ShellEvent {
    /// Describes `session` without exposing its token.
    pub fn session_changed(session: &Session) -> Self {
        Self::SessionChanged {
            authenticated: session.is_authenticated(),
            user_id: session.user_id.clone(),
            role: session.role.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_changed_never_carries_token() {
        let session = Session {
            token: Some("secret-token".to_string()),
            user_id: Some("u1".to_string()),
            role: Some("USER".to_string()),
        };
        let event = ShellEvent::session_changed(&session);
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains(r#""type":"session_changed""#));
        assert!(json.contains(r#""authenticated":true"#));
    }
}
