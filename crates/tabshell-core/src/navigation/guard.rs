use serde::{Deserialize, Serialize};

use super::route::RouteDescriptor;
use crate::session::Session;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where authenticated users are sent away from guest-only pages.
pub const HOME_PATH: &str = "/";

/// Outcome of running the guard for one transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum RedirectDecision {
    Allow,
    RedirectTo(String),
}

impl RedirectDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether `route` may be entered with `session`.
///
/// Rules are checked in order and the first one that applies wins:
/// 1. auth-only route while logged out → `/login`
/// 2. guest-only route while logged in → `/`
/// 3. otherwise allow
///
/// This only reads the locally cached session. It keeps navigation snappy but
/// is not a security boundary; the server validates the bearer token itself.
pub fn decide(route: &RouteDescriptor, session: &Session) -> RedirectDecision {
    let authenticated = session.is_authenticated();

    if route.meta.requires_auth && !authenticated {
        return RedirectDecision::RedirectTo(LOGIN_PATH.to_string());
    }

    if route.meta.requires_guest && authenticated {
        return RedirectDecision::RedirectTo(HOME_PATH.to_string());
    }

    RedirectDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session {
            token: Some("tok".to_string()),
            user_id: Some("u1".to_string()),
            role: Some("USER".to_string()),
        }
    }

    fn logged_out() -> Session {
        Session::default()
    }

    #[test]
    fn test_auth_route_redirects_anonymous_user_to_login() {
        let route = RouteDescriptor::new("/", "MainLayout").requires_auth();
        assert_eq!(
            decide(&route, &logged_out()),
            RedirectDecision::RedirectTo("/login".to_string())
        );
    }

    #[test]
    fn test_auth_route_allows_logged_in_user() {
        let route = RouteDescriptor::new("/", "MainLayout").requires_auth();
        assert!(decide(&route, &logged_in()).is_allowed());
    }

    #[test]
    fn test_guest_route_redirects_logged_in_user_home() {
        let route = RouteDescriptor::new("/login", "LoginPage").requires_guest();
        assert_eq!(
            decide(&route, &logged_in()),
            RedirectDecision::RedirectTo("/".to_string())
        );
    }

    #[test]
    fn test_guest_route_allows_anonymous_user() {
        let route = RouteDescriptor::new("/login", "LoginPage").requires_guest();
        assert!(decide(&route, &logged_out()).is_allowed());
    }

    #[test]
    fn test_unflagged_route_always_allowed() {
        let route = RouteDescriptor::new("/:catchAll(.*)*", "ErrorNotFound");
        assert!(decide(&route, &logged_in()).is_allowed());
        assert!(decide(&route, &logged_out()).is_allowed());
    }

    #[test]
    fn test_empty_token_counts_as_logged_out() {
        let route = RouteDescriptor::new("/", "MainLayout").requires_auth();
        let session = Session {
            token: Some(String::new()),
            ..logged_in()
        };
        assert_eq!(
            decide(&route, &session),
            RedirectDecision::RedirectTo(LOGIN_PATH.to_string())
        );
    }

    #[test]
    fn test_auth_rule_checked_before_guest_rule() {
        let route = RouteDescriptor::new("/odd", "Odd")
            .requires_auth()
            .requires_guest();
        assert_eq!(
            decide(&route, &logged_out()),
            RedirectDecision::RedirectTo(LOGIN_PATH.to_string())
        );
        assert_eq!(
            decide(&route, &logged_in()),
            RedirectDecision::RedirectTo(HOME_PATH.to_string())
        );
    }
}
