//! Shared HTTP client with bearer credential injection.

use std::sync::Arc;

use reqwest::{Client, Method, Request, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use tabshell_core::config::ApiConfig;
use tabshell_core::session::TokenProvider;
use thiserror::Error;

/// Errors surfaced by [`ApiClient`]. None of them are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid request URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("HTTP client configuration error: {0}")]
    Config(String),

    /// No response was received (connect failure, timeout, ...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The one request-issuing handle of the application.
///
/// Every request is built through [`ApiClient::request`], which asks the
/// token provider for the current credential and, if there is one, adds
/// `Authorization: Bearer <token>`. Without a token the request goes out
/// unmodified so public endpoints (login) keep working.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        config
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `path` against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") || self.base_url.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };

        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })
    }

    /// Starts a request with the credential already attached.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        let builder = self.client.request(method.clone(), url);

        match self.tokens.current_token().await {
            Some(token) => {
                tracing::debug!(%method, path, "Attaching bearer credential");
                Ok(builder.bearer_auth(token))
            }
            None => {
                tracing::debug!(%method, path, "Sending request without credential");
                Ok(builder)
            }
        }
    }

    /// Builds the request without sending it.
    pub async fn prepare(&self, method: Method, path: &str) -> Result<Request, ApiError> {
        self.request(method, path)
            .await?
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Sends a built request and turns non-2xx answers into `ApiError::Status`.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "Request rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.request(Method::GET, path).await?;
        Self::decode(self.send(builder).await?).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).await?.json(body);
        Self::decode(self.send(builder).await?).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
