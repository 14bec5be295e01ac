use anyhow::Result;
use tabshell_application::AppBootstrap;

pub async fn login(app: &AppBootstrap, user_id: &str, password: &str) -> Result<()> {
    let session = app.credentials.login(user_id, password).await?;
    println!(
        "Logged in as {} ({})",
        session.user_id().unwrap_or("-"),
        session.role().unwrap_or("-")
    );
    Ok(())
}

pub async fn logout(app: &AppBootstrap) {
    app.credentials.logout().await;
    println!("Logged out");
}

pub async fn status(app: &AppBootstrap) -> Result<()> {
    let session = app.credentials.session().await;
    let status = serde_json::json!({
        "authenticated": session.is_authenticated(),
        "userId": session.user_id(),
        "role": session.role(),
    });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
