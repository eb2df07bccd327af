//! SafeDNS command

use anyhow::Result;
use clap::{Args, Subcommand};
use reqwest::Method;
use serde_json::json;

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;
use crate::output;

const ZONES: Resource = Resource {
    name: "zone",
    path: "safedns/v1/zones",
    columns: &["name", "description"],
};

const RECORDS: Resource = Resource {
    name: "record",
    path: "safedns/v1/zones/{zone}/records",
    columns: &["id", "name", "type", "content", "ttl", "priority", "updated_at"],
};

fn records_path(zone: &str) -> String {
    RECORDS.path.replace("{zone}", zone)
}

#[derive(Args, Debug)]
pub struct SafednsArgs {
    #[command(subcommand)]
    pub command: SafednsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SafednsCommand {
    /// DNS zones
    #[command(subcommand)]
    Zone(ZoneCommand),

    /// Records within a zone
    #[command(subcommand)]
    Record(RecordCommand),
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommand {
    /// List zones
    List(ListArgs),

    /// Show one or more zones
    Show {
        /// Zone names
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// List records in a zone
    List {
        /// Zone name
        zone: String,

        /// Filter by record name (supports * wildcards)
        #[arg(long)]
        name: Option<String>,

        /// Filter by record type (A, AAAA, CNAME, MX, ...)
        #[arg(short = 't', long = "type")]
        record_type: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Create a record
    Create {
        /// Zone name
        zone: String,

        /// Record name (fully qualified)
        #[arg(long)]
        name: String,

        /// Record type
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        /// Record content
        #[arg(long)]
        content: String,

        /// TTL in seconds
        #[arg(long)]
        ttl: Option<u32>,

        /// Priority (MX/SRV)
        #[arg(long)]
        priority: Option<u16>,
    },

    /// Delete one or more records
    Delete {
        /// Zone name
        zone: String,

        /// Record IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

pub async fn execute(config: &Config, args: SafednsArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        SafednsCommand::Zone(ZoneCommand::List(list)) => {
            common::list(&client, config, &ZONES, ZONES.path, &list, &[]).await
        }
        SafednsCommand::Zone(ZoneCommand::Show { names, properties }) => {
            common::show(&client, config, &ZONES, &names, &properties).await
        }
        SafednsCommand::Record(RecordCommand::List {
            zone,
            name,
            record_type,
            list,
        }) => {
            let record_type = record_type.map(|t| t.to_uppercase());
            let shortcuts = [("name", name.as_deref()), ("type", record_type.as_deref())];
            common::list(&client, config, &RECORDS, &records_path(&zone), &list, &shortcuts).await
        }
        SafednsCommand::Record(RecordCommand::Create {
            zone,
            name,
            record_type,
            content,
            ttl,
            priority,
        }) => {
            let mut body = json!({
                "name": name,
                "type": record_type.to_uppercase(),
                "content": content,
            });
            if let Some(t) = ttl {
                body["ttl"] = json!(t);
            }
            if let Some(p) = priority {
                body["priority"] = json!(p);
            }

            let response = client
                .request_raw(Method::POST, &records_path(&zone), Some(body))
                .await?;
            let id = response
                .get("data")
                .and_then(|d| d.get("id"))
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            output::success(&format!("Created {} record {} ({})", record_type.to_uppercase(), name, id));
            Ok(())
        }
        SafednsCommand::Record(RecordCommand::Delete { zone, ids }) => {
            let base = records_path(&zone);
            common::act_on_each(&client, Method::DELETE, &ids, |id| format!("{}/{}", base, id), "delete record")
                .await;
            Ok(())
        }
    }
}
