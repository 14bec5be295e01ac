use anyhow::Result;
use tabshell_application::AppBootstrap;
use tabshell_core::tab::Tab;

/// Tabs live only in memory, so each invocation starts from the home tab.
pub async fn run(app: &AppBootstrap, open: &[String], close: &[String]) -> Result<()> {
    for name in open {
        app.tabs
            .open_tab(Tab::new(name.as_str(), name.as_str(), "GenericPage"))
            .await;
    }
    for name in close {
        if !app.tabs.close_tab(name).await {
            tracing::warn!(tab = %name, "Tab not closed (home or not open)");
        }
    }

    let snapshot = app.tabs.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
