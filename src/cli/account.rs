//! Account command

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;
use crate::output;

const CONTACTS: Resource = Resource {
    name: "contact",
    path: "account/v1/contacts",
    columns: &["id", "type", "first_name", "last_name"],
};

const INVOICES: Resource = Resource {
    name: "invoice",
    path: "account/v1/invoices",
    columns: &["id", "date", "paid", "net", "vat", "gross"],
};

const DETAILS_PATH: &str = "account/v1/details";
const DETAILS_COLUMNS: &[&str] = &["company_registration_number", "vat_identification_number", "primary_contact_id"];

#[derive(Args, Debug)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// Account contacts
    #[command(subcommand)]
    Contact(ContactCommand),

    /// Account invoices
    #[command(subcommand)]
    Invoice(InvoiceCommand),

    /// Show account details
    Details {
        /// Columns to show in table output
        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommand {
    /// List contacts
    List(ListArgs),

    /// Show one or more contacts
    Show {
        /// Contact IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InvoiceCommand {
    /// List invoices
    List(ListArgs),

    /// Show one or more invoices
    Show {
        /// Invoice IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

pub async fn execute(config: &Config, args: AccountArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        AccountCommand::Contact(ContactCommand::List(list)) => {
            common::list(&client, config, &CONTACTS, CONTACTS.path, &list, &[]).await
        }
        AccountCommand::Contact(ContactCommand::Show { ids, properties }) => {
            common::show(&client, config, &CONTACTS, &ids, &properties).await
        }
        AccountCommand::Invoice(InvoiceCommand::List(list)) => {
            common::list(&client, config, &INVOICES, INVOICES.path, &list, &[]).await
        }
        AccountCommand::Invoice(InvoiceCommand::Show { ids, properties }) => {
            common::show(&client, config, &INVOICES, &ids, &properties).await
        }
        AccountCommand::Details { properties } => {
            let details: Value = client.get(DETAILS_PATH).await?;
            output::print_item(&details, DETAILS_COLUMNS, &properties, &config.output_format)
        }
    }
}
