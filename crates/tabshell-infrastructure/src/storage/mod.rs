//! Durable key-value storage backends.

mod atomic_toml;
mod file_kv_store;
mod memory_kv_store;

pub use atomic_toml::AtomicTomlFile;
pub use file_kv_store::FileKeyValueStore;
pub use memory_kv_store::InMemoryKeyValueStore;
