//! HTTP access to the backend.
//!
//! `ApiClient` is the single request-issuing handle; `HttpAuthClient` is the
//! login endpoint built on top of it.

mod auth_client;
mod client;

pub use auth_client::{HttpAuthClient, LOGIN_PATH};
pub use client::{ApiClient, ApiError};
pub use reqwest::Method;
