pub mod config_service;
pub mod http;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::{ApiClient, ApiError, HttpAuthClient};
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
