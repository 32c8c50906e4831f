//! SERC CLI
//!
//! Command-line interface for SERC site content administration.

#![warn(clippy::all)]

use anyhow::Result;
use clap::Parser;
use serc_cli::cli::{Args, Command};
use serc_cli::commands::{self, Context};
use serc_cli::config_handlers::handle_config_command;
use serc_cli::{ConfigManager, SiteConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::Config { action } => {
            handle_config_command(args.config.as_deref(), action)?;
            return Ok(());
        }
        command => command,
    };

    let config = SiteConfig::load(args.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(root = %config.content.root, "Using content root");

    let ctx = Context::new(config, args.password.as_deref())?;
    let mut stdin = std::io::stdin().lock();
    commands::run(&ctx, command, &mut stdin).await?;

    Ok(())
}
