//! Config command

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::AnsClient;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Test API connection
    Test,

    /// Show config paths
    Paths,
}

pub async fn execute(config: &Config, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            output::info("Current configuration:");

            if config.api_key.is_some() {
                println!("  Auth: API key (set)");
            } else {
                output::warning("  Auth: Not configured!");
            }

            println!("  API URI: {}", config.api_uri);
            println!("  Timeout: {}s", config.timeout_seconds);
            println!("  Per page: {}", config.per_page);
            match config.max_pages {
                Some(limit) => println!("  Max pages: {}", limit),
                None => println!("  Max pages: unlimited"),
            }
            println!("  Output Format: {:?}", config.output_format);

            match config.source {
                Some(ref path) => println!("  Loaded from: {}", path.display()),
                None => println!("  Loaded from: environment only"),
            }
        }

        ConfigCommand::Test => {
            if config.api_key.is_none() {
                return Err(anyhow!("No API key configured. Set ANS_API_KEY"));
            }

            output::info("Testing API connection...");

            let client = AnsClient::new(config.clone())?;

            match client.get::<Value>("account/v1/details").await {
                Ok(_) => output::success("API key is valid!"),
                Err(e) => return Err(anyhow!("API connection failed: {}", e)),
            }
        }

        ConfigCommand::Paths => {
            output::info("Configuration paths:");

            if let Ok(config_dir) = Config::config_dir() {
                println!("  Config directory: {}", config_dir.display());
            }

            if let Ok(config_file) = Config::config_file_path() {
                println!("  Config file: {}", config_file.display());
            }

            println!("  Environment file: .env (current directory)");
        }
    }

    Ok(())
}
