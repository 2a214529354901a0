mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LOG_FILTER: &str = "trellocal=info,trellocal_core=info,\
    trellocal_provider_trello=info,trellocal_provider_google=info";

#[derive(Parser)]
#[command(name = "trellocal", version)]
#[command(about = "Mirror dated Trello cards into a Google calendar as all-day events")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/trellocal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update one calendar event per dated card (default)
    Sync,
    /// Show what sync would do without changing the calendar
    Status,
    /// List your Trello boards and their ids
    Boards,
}

fn init_tracing() {
    // RUST_LOG wins; ignore an invalid filter rather than failing startup.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout is for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => commands::sync::run(&config).await,
        Commands::Status => commands::status::run(&config).await,
        Commands::Boards => commands::boards::run(&config).await,
    }
}
