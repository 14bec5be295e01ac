//! Tabbed content panes.
//!
//! Tabs are tracked independently of routing: the UI opens and closes them,
//! and the manager keeps the ordered list plus the active tab name.

mod manager;
mod model;

pub use manager::TabManager;
pub use model::{HOME_TAB_NAME, Tab, TabSnapshot};
