//! SSL certificate command

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;
use crate::output;

const CERTIFICATES: Resource = Resource {
    name: "certificate",
    path: "ssl/v1/certificates",
    columns: &["id", "name", "status", "common_name", "valid_days", "ordered_date", "renewal_date"],
};

#[derive(Args, Debug)]
pub struct SslArgs {
    #[command(subcommand)]
    pub command: SslCommand,
}

#[derive(Subcommand, Debug)]
pub enum SslCommand {
    /// SSL certificates
    #[command(subcommand)]
    Certificate(CertificateCommand),
}

#[derive(Subcommand, Debug)]
pub enum CertificateCommand {
    /// List certificates
    List(ListArgs),

    /// Show one or more certificates
    Show {
        /// Certificate IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },

    /// Download the PEM bundle of a certificate
    Download {
        /// Certificate ID
        id: String,
    },
}

pub async fn execute(config: &Config, args: SslArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        SslCommand::Certificate(CertificateCommand::List(list)) => {
            common::list(&client, config, &CERTIFICATES, CERTIFICATES.path, &list, &[]).await
        }
        SslCommand::Certificate(CertificateCommand::Show { ids, properties }) => {
            common::show(&client, config, &CERTIFICATES, &ids, &properties).await
        }
        SslCommand::Certificate(CertificateCommand::Download { id }) => {
            let path = format!("{}/download", CERTIFICATES.item_path(&id));
            let pem: Value = client.get(&path).await?;

            for key in ["server", "intermediate"] {
                match pem.get(key).and_then(|v| v.as_str()) {
                    Some(block) => println!("{}", block.trim_end()),
                    None => output::warning(&format!("Certificate {} has no {} block", id, key)),
                }
            }
            Ok(())
        }
    }
}
