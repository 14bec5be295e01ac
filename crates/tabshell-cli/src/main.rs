use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tabshell_application::bootstrap;
use tabshell_infrastructure::ConfigService;
use tabshell_infrastructure::paths::ShellPaths;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tabshell")]
#[command(about = "TabShell CLI - session, navigation and tab management", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/tabshell/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides api.base_url from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        user_id: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the current session
    Status,
    /// Resolve a path through the navigation guard
    Navigate { path: String },
    /// Authenticated GET request, printing the JSON body
    Get { path: String },
    /// Open and close tabs, then print the resulting tab snapshot
    Tabs {
        /// Tab names to open, in order
        #[arg(long)]
        open: Vec<String>,
        /// Tab names to close after opening
        #[arg(long)]
        close: Vec<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = ShellPaths::default();
    let mut config = ConfigService::load(cli.config.as_deref(), &paths)?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let app = bootstrap(config, &paths).await?;

    match cli.command {
        Commands::Login { user_id, password } => {
            commands::auth::login(&app, &user_id, &password).await?
        }
        Commands::Logout => commands::auth::logout(&app).await,
        Commands::Status => commands::auth::status(&app).await?,
        Commands::Navigate { path } => commands::navigate::navigate(&app, &path).await?,
        Commands::Get { path } => commands::request::get(&app, &path).await?,
        Commands::Tabs { open, close } => commands::tabs::run(&app, &open, &close).await?,
    }

    Ok(())
}
