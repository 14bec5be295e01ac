use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the pinned tab that can never be closed.
pub const HOME_TAB_NAME: &str = "home";

/// A named content pane.
///
/// `name` is the identity: two tabs with the same name are the same tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Reference to the component rendered inside the tab.
    pub component: String,
    /// Props handed to the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Map<String, Value>>,
}

impl Tab {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: None,
            component: component.into(),
            props: None,
        }
    }

    /// The pinned home tab every manager starts with.
    pub fn home() -> Self {
        Self::new(HOME_TAB_NAME, "Home", "IndexPage").with_icon("home")
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Adds one component prop, creating the map on first use.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_home(&self) -> bool {
        self.name == HOME_TAB_NAME
    }
}

/// What the rendering layer consumes: every tab in order plus the active one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub tabs: Vec<Tab>,
    pub active_tab: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_tab() {
        let home = Tab::home();
        assert!(home.is_home());
        assert_eq!(home.component, "IndexPage");
        assert_eq!(home.icon.as_deref(), Some("home"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let tab = Tab::new("users", "Users", "UserListPage");
        let json = serde_json::to_value(&tab).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "users", "label": "Users", "component": "UserListPage"})
        );
    }

    #[test]
    fn test_with_prop_builds_props_map() {
        let tab = Tab::new("user-7", "User 7", "UserDetailPage")
            .with_prop("userId", 7)
            .with_prop("readonly", true);
        let props = tab.props.unwrap();
        assert_eq!(props.get("userId"), Some(&Value::from(7)));
        assert_eq!(props.get("readonly"), Some(&Value::from(true)));
    }

    #[test]
    fn test_snapshot_uses_camel_case() {
        let snapshot = TabSnapshot {
            tabs: vec![Tab::home()],
            active_tab: Some(HOME_TAB_NAME.to_string()),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["activeTab"], "home");
        assert_eq!(json["tabs"][0]["icon"], "home");
    }
}
