//! Login collaborator and token lookup traits.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Body sent to the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// Successful login endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: String,
    pub role: String,
}

/// The external authentication service.
///
/// Errors are opaque to the caller: implementations report what went wrong
/// and nobody downstream reclassifies it.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError>;
}

/// Supplies the bearer token attached to outgoing requests.
///
/// The HTTP layer depends on this trait instead of the credential store so
/// the two can be constructed independently and wired together afterwards.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn current_token(&self) -> Option<String>;
}
