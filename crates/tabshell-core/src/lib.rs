//! Domain layer for TabShell: session model, route table and navigation
//! guard, tab manager, and the traits the infrastructure layer implements.

pub mod config;
pub mod error;
pub mod event;
pub mod navigation;
pub mod session;
pub mod tab;

// Re-export common error types
pub use error::{AuthError, NavigationError, ShellError};
