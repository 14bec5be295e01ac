use anyhow::Result;
use tabshell_application::AppBootstrap;

pub async fn get(app: &AppBootstrap, path: &str) -> Result<()> {
    let body: serde_json::Value = app.api.get_json(path).await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
