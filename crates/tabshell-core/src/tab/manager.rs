use super::model::{HOME_TAB_NAME, Tab, TabSnapshot};

/// Ordered collection of open tabs plus the active tab's name.
///
/// The home tab is inserted on construction and `close_tab` refuses to
/// remove it, so under normal use the collection is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active_tab: Option<String>,
}

impl TabManager {
    /// Creates a manager holding only the home tab, which is active.
    pub fn new() -> Self {
        Self::with_home(Tab::home())
    }

    /// Like [`TabManager::new`] with a customized home tab (label, icon, ...).
    /// The tab is renamed to `home` if needed.
    pub fn with_home(mut home: Tab) -> Self {
        home.name = HOME_TAB_NAME.to_string();
        Self {
            tabs: vec![home],
            active_tab: Some(HOME_TAB_NAME.to_string()),
        }
    }

    /// Activates `tab`, appending it first unless a tab with that name is open.
    ///
    /// An already-open tab keeps its position and its original contents.
    /// Returns true if the tab was newly inserted.
    pub fn open_tab(&mut self, tab: Tab) -> bool {
        let inserted = if self.contains(&tab.name) {
            false
        } else {
            self.tabs.push(tab.clone());
            true
        };
        self.active_tab = Some(tab.name);
        inserted
    }

    /// Closes the named tab. Returns true if something was removed.
    ///
    /// Home and unknown names are ignored. Closing the active tab moves focus
    /// to its right neighbour, or to the left one when it was the last tab.
    pub fn close_tab(&mut self, name: &str) -> bool {
        if name == HOME_TAB_NAME {
            return false;
        }
        let Some(index) = self.position(name) else {
            return false;
        };

        if self.active_tab.as_deref() == Some(name) {
            let neighbour = self
                .tabs
                .get(index + 1)
                .or_else(|| index.checked_sub(1).and_then(|left| self.tabs.get(left)));
            self.active_tab = neighbour.map(|tab| tab.name.clone());
        }

        self.tabs.remove(index);
        if self.tabs.is_empty() {
            self.active_tab = None;
        }
        true
    }

    /// Activates an already-open tab. Unknown names are ignored.
    pub fn set_active(&mut self, name: &str) -> bool {
        if !self.contains(name) {
            return false;
        }
        self.active_tab = Some(name.to_string());
        true
    }

    /// Moves the tab at `from` so that it ends up at index `to`.
    ///
    /// Out-of-range indices leave the order untouched. The active tab is
    /// tracked by name, so it stays active wherever it moves.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tabs.len() || to >= self.tabs.len() || from == to {
            return false;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        true
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// The active tab itself rather than its name.
    pub fn active(&self) -> Option<&Tab> {
        self.active_tab.as_deref().and_then(|name| self.get(name))
    }

    pub fn get(&self, name: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn snapshot(&self) -> TabSnapshot {
        TabSnapshot {
            tabs: self.tabs.clone(),
            active_tab: self.active_tab.clone(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.name == name)
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}
