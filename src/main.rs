use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::{app_init::initialize_app, config::default_config_path};

mod app_init;
mod client;
mod config;
mod domain;
mod id;
mod interpreter;
mod logging;
mod result;
mod state;
mod validator;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML config file (created with defaults when missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force debug level on every log output
    #[arg(short, long)]
    debug: bool,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);

    // missing credentials end here, before any polling
    let components = initialize_app(&config_path, cli.debug)?;
    let _log_guard = components._log_guard;
    let mut poller = components.poller;

    if cli.once {
        poller.tick().await;
        info!(
            cursor = poller.state().cursor_timestamp,
            status = ?poller.state().last_seen_status,
            "Single cycle finished"
        );
        return Ok(());
    }

    poller.run().await;
    Ok(())
}
