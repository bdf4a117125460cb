mod commands;
mod logging;
mod render;
mod shell;

use anyhow::{Context, Result};
use blogpad_client::{App, ClientConfig, FileStorage};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{Action, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server base URL (overrides BLOGPAD_API_URL)
    #[arg(short, long)]
    server: Option<String>,

    /// API version segment (overrides BLOGPAD_API_VERSION)
    #[arg(long)]
    api_version: Option<String>,

    /// Directory holding the saved session
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Action(Action),

    /// Interactive session
    Shell,
}

fn storage_dir(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(dir) => Ok(dir),
        None => {
            let base = dirs::config_dir()
                .or_else(dirs::home_dir)
                .context("Failed to locate a config directory")?;
            Ok(base.join("blogpad"))
        }
    }
}

fn build_app(cli: &Cli) -> Result<App> {
    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(server) = &cli.server {
        config.base_url = server.clone();
    }
    if let Some(version) = &cli.api_version {
        config.version = version.clone();
    }

    let dir = storage_dir(cli.storage_dir.clone())?;
    tracing::debug!("Session storage: {}", dir.display());
    let storage = FileStorage::new(dir);
    let app = App::new(&config, Box::new(storage)).context("Failed to read saved session")?;
    Ok(app)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let app = build_app(&cli)?;
    tracing::debug!("Connecting to {}", app.api.root());
    let mut session = Session::new(app);

    match cli.command {
        Commands::Action(action) => session.execute(action).await,
        Commands::Shell => shell::run(session).await,
    }
}
