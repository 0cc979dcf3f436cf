//! Trufos - Main Entry Point
//!
//! Initializes logging from the environment or the settings file and
//! dispatches to the collection commands.

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trufos_infrastructure::SettingsRepository;

mod cli;
mod commands;

const LOG_ENV: &str = "TRUFOS_LOG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let settings_repo = SettingsRepository::new();
    let settings = settings_repo.load().await?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter_or_default())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Starting Trufos v{}", env!("CARGO_PKG_VERSION"));

    commands::run_command(cli, &settings_repo, &settings).await
}
