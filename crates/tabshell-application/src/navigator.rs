//! Guarded navigation over the route table.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use tabshell_core::error::NavigationError;
use tabshell_core::event::ShellEvent;
use tabshell_core::navigation::{RedirectDecision, RouteTable, decide};
use tabshell_core::session::SharedSession;
use tokio::sync::RwLock;

use crate::events::EventBus;

/// Maximum redirects followed for one navigation before giving up.
pub const MAX_REDIRECT_DEPTH: usize = 5;

/// A navigation that settled on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// Path the caller asked for.
    pub requested: String,
    /// Path actually entered, after redirects.
    pub path: String,
    /// View reference of the entered route.
    pub view: String,
    pub params: BTreeMap<String, String>,
    /// Redirect targets in the order they were followed.
    pub redirects: Vec<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Runs the guard before every transition and keeps a history of where
/// the user ended up.
///
/// The session is read once per navigation from the shared in-memory copy;
/// there is no remote validation.
pub struct Navigator {
    routes: RouteTable,
    session: SharedSession,
    events: EventBus,
    history: RwLock<Vec<Navigation>>,
}

impl Navigator {
    pub fn new(routes: RouteTable, session: SharedSession, events: EventBus) -> Self {
        Self {
            routes,
            session,
            events,
            history: RwLock::new(Vec::new()),
        }
    }

    /// Navigates to `path`, following guard redirects, and records the result.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let navigation = self.resolve(path).await?;
        self.history.write().await.push(navigation.clone());
        self.publish(&navigation);
        Ok(navigation)
    }

    /// Returns to the previous entry, re-running the guard for it.
    ///
    /// `Ok(None)` when there is nothing to go back to. If the guard now
    /// redirects (e.g. the user logged out meanwhile) the redirect target
    /// replaces the previous entry.
    pub async fn back(&self) -> Result<Option<Navigation>, NavigationError> {
        let mut history = self.history.write().await;
        if history.len() < 2 {
            return Ok(None);
        }

        let previous = history[history.len() - 2].requested.clone();
        let navigation = self.resolve(&previous).await?;

        history.pop();
        if let Some(last) = history.last_mut() {
            *last = navigation.clone();
        }
        drop(history);

        self.publish(&navigation);
        Ok(Some(navigation))
    }

    /// Where the guard would send a navigation to `path`, without recording it.
    pub async fn resolve(&self, path: &str) -> Result<Navigation, NavigationError> {
        let session = self.session.snapshot().await;
        let mut target = path.to_string();
        let mut redirects = Vec::new();

        for _ in 0..=MAX_REDIRECT_DEPTH {
            let matched = self
                .routes
                .resolve(&target)
                .ok_or_else(|| NavigationError::NoMatchingRoute(target.clone()))?;

            match decide(matched.route, &session) {
                RedirectDecision::Allow => {
                    tracing::debug!(requested = path, path = %matched.path, view = %matched.route.view, "Navigation allowed");
                    return Ok(Navigation {
                        requested: path.to_string(),
                        path: matched.path,
                        view: matched.route.view.clone(),
                        params: matched.params,
                        redirects,
                    });
                }
                RedirectDecision::RedirectTo(to) => {
                    tracing::info!(from = %target, to = %to, "Guard redirect");
                    redirects.push(to.clone());
                    target = to;
                }
            }
        }

        tracing::warn!(requested = path, "Redirect loop detected");
        Err(NavigationError::RedirectLoop {
            path: target,
            depth: MAX_REDIRECT_DEPTH,
        })
    }

    pub async fn current(&self) -> Option<Navigation> {
        self.history.read().await.last().cloned()
    }

    pub async fn history(&self) -> Vec<Navigation> {
        self.history.read().await.clone()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    fn publish(&self, navigation: &Navigation) {
        self.events.publish(ShellEvent::Navigated {
            requested: navigation.requested.clone(),
            path: navigation.path.clone(),
            view: navigation.view.clone(),
            at: Utc::now(),
        });
    }
}
