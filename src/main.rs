//! ans - command-line client for the ANS hosting REST API
//!
//! List commands accept `--filter property[:operator]=value` and `--sort`
//! flags and fetch every page unless `--page` is given.

mod api;
mod cli;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let mut config = if cli.needs_auth() {
        Config::load()?
    } else {
        Config::load_optional()?
    };

    if let Some(ref format) = cli.format {
        config.output_format = format.parse()?;
    }

    // Execute command
    match cli.command {
        Commands::Account(args) => cli::account::execute(&config, args).await,
        Commands::Ecloud(args) => cli::ecloud::execute(&config, args).await,
        Commands::Pss(args) => cli::pss::execute(&config, args).await,
        Commands::Ssl(args) => cli::ssl::execute(&config, args).await,
        Commands::Safedns(args) => cli::safedns::execute(&config, args).await,
        Commands::Ddosx(args) => cli::ddosx::execute(&config, args).await,
        Commands::Raw(args) => cli::raw::execute(&config, args).await,
        Commands::Config(args) => cli::config_cmd::execute(&config, args).await,
    }
}
