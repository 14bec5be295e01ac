use anyhow::Result;
use tabshell_application::AppBootstrap;

pub async fn navigate(app: &AppBootstrap, path: &str) -> Result<()> {
    let navigation = app.navigator.navigate(path).await?;

    for hop in &navigation.redirects {
        println!("-> redirected to {hop}");
    }
    println!("{} ({})", navigation.path, navigation.view);
    if !navigation.params.is_empty() {
        println!("{}", serde_json::to_string_pretty(&navigation.params)?);
    }
    Ok(())
}
