//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authenticated identity (`Session`) and the durable key names
//! - `storage`: durable key-value storage interface (`KeyValueStorage`)
//! - `auth`: login collaborator and token lookup traits
//! - `shared`: the single session writer and the read-only views handed to services

mod auth;
mod model;
mod shared;
mod storage;

// Re-export public API
pub use auth::{AuthClient, LoginRequest, LoginResponse, TokenProvider};
pub use model::{KEY_ROLE, KEY_TOKEN, KEY_USER_ID, SESSION_KEYS, Session};
pub use shared::{SessionWriter, SharedSession};
pub use storage::KeyValueStorage;
