//! Exercises `ApiClient` and `HttpAuthClient` against a scripted local server.

use std::sync::Arc;

use tabshell_core::config::ApiConfig;
use tabshell_core::error::AuthError;
use tabshell_core::session::{AuthClient, LoginRequest, Session, SharedSession};
use tabshell_infrastructure::{ApiClient, ApiError, HttpAuthClient};
use tabshell_test_utils::{MockServer, header, unreachable_base_url};

fn api(base_url: &str, session: Session) -> ApiClient {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    ApiClient::new(&config, Arc::new(SharedSession::new(session))).unwrap()
}

#[tokio::test]
async fn request_with_token_carries_bearer_header() {
    let mut server = MockServer::once("200 OK", r#"{"ok":true}"#).await.unwrap();
    let session = Session {
        token: Some("tok".to_string()),
        user_id: Some("u1".to_string()),
        role: Some("USER".to_string()),
    };

    let body: serde_json::Value = api(server.base_url(), session)
        .get_json("/api/users")
        .await
        .unwrap();

    assert_eq!(body["ok"], true);
    let raw = server.next_request().await.unwrap();
    assert!(raw.starts_with("GET /api/users "));
    assert_eq!(header(&raw, "authorization").as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn request_without_token_has_no_authorization_header() {
    let mut server = MockServer::once("200 OK", "[]").await.unwrap();

    let body: Vec<serde_json::Value> = api(server.base_url(), Session::default())
        .get_json("/api/public")
        .await
        .unwrap();

    assert!(body.is_empty());
    let raw = server.next_request().await.unwrap();
    assert!(header(&raw, "authorization").is_none());
}

#[tokio::test]
async fn non_success_status_is_surfaced() {
    let server = MockServer::once("403 Forbidden", r#"{"error":"forbidden"}"#)
        .await
        .unwrap();

    let err = api(server.base_url(), Session::default())
        .get_json::<serde_json::Value>("/api/admin")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(matches!(err, ApiError::Status { ref body, .. } if body.contains("forbidden")));
}

#[tokio::test]
async fn login_posts_credentials_and_decodes_response() {
    let mut server = MockServer::once(
        "200 OK",
        r#"{"accessToken":"tok","tokenType":"Bearer","userId":"u1","role":"USER"}"#,
    )
    .await
    .unwrap();
    let auth = HttpAuthClient::new(api(server.base_url(), Session::default()));

    let response = auth
        .login(&LoginRequest {
            user_id: "u1".to_string(),
            password: "p1".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(response.access_token, "tok");
    assert_eq!(response.role, "USER");
    let raw = server.next_request().await.unwrap();
    assert!(raw.starts_with("POST /auth/login "));
    assert!(raw.contains(r#""userId":"u1""#));
    assert!(raw.contains(r#""password":"p1""#));
}

#[tokio::test]
async fn login_rejection_keeps_server_message() {
    let server = MockServer::once("401 Unauthorized", "bad credentials").await.unwrap();
    let auth = HttpAuthClient::new(api(server.base_url(), Session::default()));

    let err = auth
        .login(&LoginRequest {
            user_id: "u1".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::Rejected {
            status: 401,
            message: "bad credentials".to_string()
        }
    );
}

#[tokio::test]
async fn login_with_malformed_body_is_invalid_response() {
    let server = MockServer::once("200 OK", r#"{"unexpected":1}"#).await.unwrap();
    let auth = HttpAuthClient::new(api(server.base_url(), Session::default()));

    let err = auth
        .login(&LoginRequest {
            user_id: "u1".to_string(),
            password: "p1".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let base_url = unreachable_base_url().await.unwrap();

    let auth = HttpAuthClient::new(api(&base_url, Session::default()));
    let err = auth
        .login(&LoginRequest {
            user_id: "u1".to_string(),
            password: "p1".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::Transport(_)));
}
