//! Shared, observable tab state.

use tabshell_core::event::ShellEvent;
use tabshell_core::tab::{Tab, TabManager, TabSnapshot};
use tokio::sync::RwLock;

use crate::events::EventBus;

/// `TabManager` behind a lock, publishing `TabsChanged` after every
/// operation that actually changed something.
pub struct TabService {
    manager: RwLock<TabManager>,
    events: EventBus,
}

impl TabService {
    pub fn new(events: EventBus) -> Self {
        Self::with_manager(TabManager::new(), events)
    }

    pub fn with_manager(manager: TabManager, events: EventBus) -> Self {
        Self {
            manager: RwLock::new(manager),
            events,
        }
    }

    /// Opens (or re-activates) `tab`.
    pub async fn open_tab(&self, tab: Tab) {
        self.mutate(|manager| {
            let name = tab.name.clone();
            let was_active = manager.active_tab() == Some(name.as_str());
            let inserted = manager.open_tab(tab);
            tracing::debug!(tab = %name, inserted, "Opened tab");
            inserted || !was_active
        })
        .await;
    }

    /// Closes the named tab; home and unknown names are ignored.
    pub async fn close_tab(&self, name: &str) -> bool {
        self.mutate(|manager| {
            let closed = manager.close_tab(name);
            if closed {
                tracing::debug!(tab = name, active = ?manager.active_tab(), "Closed tab");
            }
            closed
        })
        .await
    }

    pub async fn set_active(&self, name: &str) -> bool {
        self.mutate(|manager| {
            let changed = manager.active_tab() != Some(name);
            manager.set_active(name) && changed
        })
        .await
    }

    pub async fn move_tab(&self, from: usize, to: usize) -> bool {
        self.mutate(|manager| manager.move_tab(from, to)).await
    }

    pub async fn snapshot(&self) -> TabSnapshot {
        self.manager.read().await.snapshot()
    }

    pub async fn active_tab(&self) -> Option<String> {
        self.manager.read().await.active_tab().map(str::to_string)
    }

    /// Applies `f`; if it reports a change, publishes the resulting snapshot.
    async fn mutate<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut TabManager) -> bool,
    {
        let mut manager = self.manager.write().await;
        let changed = f(&mut *manager);
        if changed {
            self.events.publish(ShellEvent::TabsChanged {
                snapshot: manager.snapshot(),
            });
        }
        changed
    }
}
