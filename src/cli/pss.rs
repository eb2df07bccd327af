//! PSS support request command

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;

const REQUESTS: Resource = Resource {
    name: "request",
    path: "pss/v1/requests",
    columns: &["id", "subject", "status", "priority", "created_at"],
};

const REPLIES: Resource = Resource {
    name: "reply",
    path: "pss/v1/replies",
    columns: &["id", "author.name", "created_at"],
};

#[derive(Args, Debug)]
pub struct PssArgs {
    #[command(subcommand)]
    pub command: PssCommand,
}

#[derive(Subcommand, Debug)]
pub enum PssCommand {
    /// Support requests
    #[command(subcommand)]
    Request(RequestCommand),

    /// Replies on a support request
    #[command(subcommand)]
    Reply(ReplyCommand),
}

#[derive(Subcommand, Debug)]
pub enum RequestCommand {
    /// List requests
    List {
        /// Filter by status (e.g. completed, awaiting_customer_response)
        #[arg(long)]
        status: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more requests
    Show {
        /// Request IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReplyCommand {
    /// List replies for a request
    List {
        /// Request ID
        request: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more replies
    Show {
        /// Reply IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

pub async fn execute(config: &Config, args: PssArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        PssCommand::Request(RequestCommand::List { status, list }) => {
            let shortcuts = [("status", status.as_deref())];
            common::list(&client, config, &REQUESTS, REQUESTS.path, &list, &shortcuts).await
        }
        PssCommand::Request(RequestCommand::Show { ids, properties }) => {
            common::show(&client, config, &REQUESTS, &ids, &properties).await
        }
        PssCommand::Reply(ReplyCommand::List { request, list }) => {
            let path = format!("{}/replies", REQUESTS.item_path(&request));
            common::list(&client, config, &REPLIES, &path, &list, &[]).await
        }
        PssCommand::Reply(ReplyCommand::Show { ids, properties }) => {
            common::show(&client, config, &REPLIES, &ids, &properties).await
        }
    }
}
