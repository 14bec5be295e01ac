//! Login endpoint client.

use async_trait::async_trait;
use tabshell_core::error::AuthError;
use tabshell_core::session::{AuthClient, LoginRequest, LoginResponse};

use super::client::{ApiClient, ApiError};

pub const LOGIN_PATH: &str = "/auth/login";

/// `AuthClient` backed by `POST /auth/login`.
#[derive(Clone)]
pub struct HttpAuthClient {
    api: ApiClient,
}

impl HttpAuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthClient for HttpAuthClient {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        self.api
            .post_json(LOGIN_PATH, request)
            .await
            .map_err(|err| match err {
                ApiError::Status { status, body } => AuthError::Rejected {
                    status,
                    message: body,
                },
                ApiError::Decode(message) => AuthError::InvalidResponse(message),
                other => AuthError::Transport(other.to_string()),
            })
    }
}
