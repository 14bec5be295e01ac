pub mod bootstrap;
pub mod credential_store;
pub mod events;
pub mod navigator;
pub mod tab_service;

pub use bootstrap::{AppBootstrap, bootstrap, bootstrap_with_routes, bootstrap_with_storage};
pub use credential_store::CredentialStore;
pub use events::EventBus;
pub use navigator::{MAX_REDIRECT_DEPTH, Navigation, Navigator};
pub use tab_service::TabService;
