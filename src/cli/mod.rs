//! CLI commands module

pub mod account;
pub mod common;
pub mod config_cmd;
pub mod ddosx;
pub mod ecloud;
pub mod pss;
pub mod raw;
pub mod safedns;
pub mod ssl;

use clap::{Parser, Subcommand};

/// ans - ANS hosting CLI
#[derive(Parser, Debug)]
#[command(name = "ans")]
#[command(version)]
#[command(about = "Command-line client for the ANS hosting REST API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: table, json, pretty, compact
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Commands that can run without an API key
    pub fn needs_auth(&self) -> bool {
        !matches!(self.command, Commands::Config(_))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account contacts, invoices and details
    Account(account::AccountArgs),

    /// eCloud VPCs and instances
    Ecloud(ecloud::EcloudArgs),

    /// PSS support requests
    Pss(pss::PssArgs),

    /// SSL certificates
    Ssl(ssl::SslArgs),

    /// SafeDNS zones and records
    Safedns(safedns::SafednsArgs),

    /// DDoSX protected domains
    Ddosx(ddosx::DdosxArgs),

    /// Raw API requests
    Raw(raw::RawArgs),

    /// Configuration management
    Config(config_cmd::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "ans",
            "ecloud",
            "instance",
            "list",
            "--name",
            "web*",
            "--filter",
            "vcpu_cores:gt=2",
            "--filter",
            "sync.status=complete",
            "--sort",
            "name:desc",
            "--page",
            "2",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format.as_deref(), Some("json"));
        match cli.command {
            Commands::Ecloud(ecloud::EcloudArgs {
                command:
                    ecloud::EcloudCommand::Instance(ecloud::InstanceCommand::List { name, vpc, list }),
            }) => {
                assert_eq!(name.as_deref(), Some("web*"));
                assert!(vpc.is_none());
                assert_eq!(list.filters.len(), 2);
                assert_eq!(list.sort.as_deref(), Some("name:desc"));
                assert_eq!(list.page, Some(2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_requires_ids() {
        assert!(Cli::try_parse_from(["ans", "pss", "request", "show"]).is_err());
    }

    #[test]
    fn test_zero_page_flags_are_rejected() {
        for flag in ["--page", "--per-page"] {
            let zero = Cli::try_parse_from(["ans", "ssl", "certificate", "list", flag, "0"]);
            assert!(zero.is_err(), "{} 0 should be rejected", flag);
            let one = Cli::try_parse_from(["ans", "ssl", "certificate", "list", flag, "1"]);
            assert!(one.is_ok(), "{} 1 should be accepted", flag);
        }
    }

    #[test]
    fn test_config_needs_no_auth() {
        let cli = Cli::try_parse_from(["ans", "config", "paths"]).unwrap();
        assert!(!cli.needs_auth());
        let cli = Cli::try_parse_from(["ans", "ddosx", "domain", "list"]).unwrap();
        assert!(cli.needs_auth());
    }
}
