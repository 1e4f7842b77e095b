// Energy optimizer - main.rs
// Loads layered config, initialises logging, then dispatches the CLI command.

use anyhow::Context;
use clap::Parser;
use energy_optimizer::cli::{dispatch, Cli};
use energy_optimizer::config::load_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;

    let level = config
        .logging
        .tracing_level()
        .map_err(anyhow::Error::msg)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Config loaded: variant={}", config.network.variant);

    dispatch(cli, config)?;
    Ok(())
}
