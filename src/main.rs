//! Wanted Board Entry Point

mod app;
mod view;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use app::Command;
use wanted_sync_lib::config::AppConfig;
use wanted_sync_lib::AppState;

/// Browse and maintain FBI Wanted records in the local store
#[derive(Debug, Parser)]
#[command(name = "wanted-board", version)]
struct Cli {
    /// JSON config file; environment variables override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = rolling_logger::init_logger(&cli.log_dir, "WantedBoard") {
        eprintln!("Logging to file disabled: {}", e);
    }

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    log::info!("Local store {}, source {}", config.api_url, config.fbi_api);

    let state = AppState::connect(config).context("Failed to build HTTP client")?;
    let mut stdout = std::io::stdout().lock();
    app::run(&state, cli.command.unwrap_or_default(), &mut stdout).await
}
