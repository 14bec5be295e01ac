use serde::{Deserialize, Serialize};

use super::auth::LoginResponse;

/// Durable key holding the bearer token. Its absence means "logged out".
pub const KEY_TOKEN: &str = "auth_token";
/// Durable key holding the logged-in user's id.
pub const KEY_USER_ID: &str = "auth_userId";
/// Durable key holding the logged-in user's role.
pub const KEY_ROLE: &str = "auth_role";

/// All keys owned by the session, in write order.
pub const SESSION_KEYS: [&str; 3] = [KEY_TOKEN, KEY_USER_ID, KEY_ROLE];

/// The current user's authentication state.
///
/// `token` is the only field that decides whether the user is logged in;
/// `user_id` and `role` are meaningful only while a token is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl Session {
    /// Creates an empty (logged out) session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the session described by a successful login response.
    pub fn from_login(response: &LoginResponse) -> Self {
        Self {
            token: Some(response.access_token.clone()),
            user_id: Some(response.user_id.clone()),
            role: Some(response.role.clone()),
        }
    }

    /// True iff a non-empty token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Returns the token only when the session is authenticated.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Pairs each durable key with the value it should hold for this session.
    pub fn to_entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (KEY_TOKEN, self.token.as_deref()),
            (KEY_USER_ID, self.user_id.as_deref()),
            (KEY_ROLE, self.role.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.bearer_token().is_none());
    }

    #[test]
    fn test_is_authenticated_tracks_token_presence() {
        let cases = [
            (None, false),
            (Some(""), false),
            (Some("tok"), true),
        ];
        for (token, expected) in cases {
            let session = Session {
                token: token.map(str::to_string),
                user_id: Some("u1".to_string()),
                role: Some("USER".to_string()),
            };
            assert_eq!(session.is_authenticated(), expected, "token = {token:?}");
        }
    }

    #[test]
    fn test_identity_without_token_is_not_authenticated() {
        let session = Session {
            token: None,
            user_id: Some("u1".to_string()),
            role: Some("ADMIN".to_string()),
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_from_login() {
        let response = LoginResponse {
            access_token: "tok".to_string(),
            token_type: "Bearer".to_string(),
            user_id: "u1".to_string(),
            role: "USER".to_string(),
        };
        let session = Session::from_login(&response);
        assert_eq!(session.bearer_token(), Some("tok"));
        assert_eq!(session.user_id(), Some("u1"));
        assert_eq!(session.role(), Some("USER"));
    }
}
