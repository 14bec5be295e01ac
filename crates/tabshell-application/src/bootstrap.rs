//! Composition root: builds every service from a `ShellConfig`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tabshell_core::config::ShellConfig;
use tabshell_core::navigation::{RouteDescriptor, RouteTable, default_routes};
use tabshell_core::session::{KeyValueStorage, SessionWriter};
use tabshell_infrastructure::paths::ShellPaths;
use tabshell_infrastructure::{ApiClient, FileKeyValueStore, HttpAuthClient};

use crate::credential_store::CredentialStore;
use crate::events::EventBus;
use crate::navigator::Navigator;
use crate::tab_service::TabService;

/// Everything a host needs, already wired together.
///
/// The session is restored first. The credential store owns its writer and
/// the HTTP client and navigator get read-only views, so neither has to know
/// about the store.
pub struct AppBootstrap {
    pub config: ShellConfig,
    pub events: EventBus,
    pub credentials: Arc<CredentialStore>,
    pub api: ApiClient,
    pub navigator: Navigator,
    pub tabs: TabService,
}

/// Bootstraps with file-backed session storage.
pub async fn bootstrap(config: ShellConfig, paths: &ShellPaths) -> Result<AppBootstrap> {
    let session_path = match &config.storage.path {
        Some(path) => path.clone(),
        None => paths.session_file()?,
    };

    tracing::info!("[Bootstrap] Session storage at: {}", session_path.display());
    let storage = FileKeyValueStore::open(session_path)
        .await
        .context("Failed to open session storage")?;

    bootstrap_with_storage(config, Arc::new(storage)).await
}

/// Bootstraps on top of any storage backend with the default route table.
pub async fn bootstrap_with_storage(
    config: ShellConfig,
    storage: Arc<dyn KeyValueStorage>,
) -> Result<AppBootstrap> {
    bootstrap_with_routes(config, storage, default_routes()).await
}

pub async fn bootstrap_with_routes(
    config: ShellConfig,
    storage: Arc<dyn KeyValueStorage>,
    routes: Vec<RouteDescriptor>,
) -> Result<AppBootstrap> {
    config.validate()?;

    let writer = SessionWriter::load(storage.as_ref())
        .await
        .context("Failed to restore session")?;
    let session = writer.reader();

    let api = ApiClient::new(&config.api, Arc::new(session.clone()))
        .context("Failed to build HTTP client")?;
    let auth = HttpAuthClient::new(api.clone());

    let events = EventBus::new();
    let credentials = Arc::new(CredentialStore::new(
        writer,
        storage,
        Arc::new(auth),
        events.clone(),
    ));

    let routes = RouteTable::new(routes).context("Invalid route table")?;
    let navigator = Navigator::new(routes, session, events.clone());
    let tabs = TabService::new(events.clone());

    tracing::info!(
        "[Bootstrap] Ready (base_url: {}, authenticated: {})",
        api.base_url(),
        credentials.is_authenticated().await
    );

    Ok(AppBootstrap {
        config,
        events,
        credentials,
        api,
        navigator,
        tabs,
    })
}
