//! DDoSX command

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;

const DOMAINS: Resource = Resource {
    name: "domain",
    path: "ddosx/v1/domains",
    columns: &["name", "status", "dns_active", "cdn.active", "waf.mode"],
};

#[derive(Args, Debug)]
pub struct DdosxArgs {
    #[command(subcommand)]
    pub command: DdosxCommand,
}

#[derive(Subcommand, Debug)]
pub enum DdosxCommand {
    /// Protected domains
    #[command(subcommand)]
    Domain(DomainCommand),
}

#[derive(Subcommand, Debug)]
pub enum DomainCommand {
    /// List domains
    List(ListArgs),

    /// Show one or more domains
    Show {
        /// Domain names
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

pub async fn execute(config: &Config, args: DdosxArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        DdosxCommand::Domain(DomainCommand::List(list)) => {
            common::list(&client, config, &DOMAINS, DOMAINS.path, &list, &[]).await
        }
        DdosxCommand::Domain(DomainCommand::Show { names, properties }) => {
            common::show(&client, config, &DOMAINS, &names, &properties).await
        }
    }
}
