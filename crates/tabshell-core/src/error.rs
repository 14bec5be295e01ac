//! Error types for the TabShell application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for storage, configuration and bootstrap failures.
///
/// Authentication and navigation failures have their own enums below so
/// callers can match on them without digging through unrelated variants.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ShellError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable storage error (key-value layer)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShellError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShellError>`.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Login failure as reported by the authentication collaborator.
///
/// The credential store never classifies these further; whatever the
/// collaborator produced is handed back to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// The server answered with a non-success status (bad credentials, unknown user, ...).
    #[error("Login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Login request failed: {0}")]
    Transport(String),

    /// The server answered 2xx but the body was not a login response.
    #[error("Invalid login response: {0}")]
    InvalidResponse(String),

    /// The session could not be written to durable storage.
    #[error("Failed to persist session: {0}")]
    Storage(String),
}

impl From<ShellError> for AuthError {
    fn from(err: ShellError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// Errors raised while resolving a navigation request.
///
/// The guard itself never fails; these only describe a route table that
/// cannot answer a path or a chain of redirects that never settles.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No route matched. Only possible when the table lacks a catch-all.
    #[error("No route matches '{0}'")]
    NoMatchingRoute(String),

    /// Redirects kept bouncing between routes.
    #[error("Redirect loop detected (depth {depth}) navigating to '{path}'")]
    RedirectLoop { path: String, depth: usize },
}
