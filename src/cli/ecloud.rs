//! eCloud command

use anyhow::Result;
use clap::{Args, Subcommand};
use reqwest::Method;

use crate::api::AnsClient;
use crate::cli::common::{self, ListArgs, Resource};
use crate::config::Config;

const VPCS: Resource = Resource {
    name: "VPC",
    path: "ecloud/v2/vpcs",
    columns: &["id", "name", "region_id", "sync.status"],
};

const INSTANCES: Resource = Resource {
    name: "instance",
    path: "ecloud/v2/instances",
    columns: &["id", "name", "vpc_id", "vcpu_cores", "ram_capacity", "online", "sync.status"],
};

#[derive(Args, Debug)]
pub struct EcloudArgs {
    #[command(subcommand)]
    pub command: EcloudCommand,
}

#[derive(Subcommand, Debug)]
pub enum EcloudCommand {
    /// Manage VPCs
    #[command(subcommand)]
    Vpc(VpcCommand),

    /// Manage instances
    #[command(subcommand)]
    Instance(InstanceCommand),
}

#[derive(Subcommand, Debug)]
pub enum VpcCommand {
    /// List VPCs
    List {
        /// Filter by name (supports * wildcards)
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more VPCs
    Show {
        /// VPC IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum InstanceCommand {
    /// List instances
    List {
        /// Filter by name (supports * wildcards)
        #[arg(long)]
        name: Option<String>,

        /// Filter by VPC ID
        #[arg(long)]
        vpc: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more instances
    Show {
        /// Instance IDs
        #[arg(required = true)]
        ids: Vec<String>,

        #[arg(long = "property")]
        properties: Vec<String>,
    },

    /// Power on one or more instances
    Start {
        /// Instance IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Power off one or more instances
    Stop {
        /// Instance IDs
        #[arg(required = true)]
        ids: Vec<String>,

        /// Hard power off instead of a guest shutdown
        #[arg(long)]
        force: bool,
    },
}

pub async fn execute(config: &Config, args: EcloudArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    match args.command {
        EcloudCommand::Vpc(VpcCommand::List { name, list }) => {
            common::list(&client, config, &VPCS, VPCS.path, &list, &[("name", name.as_deref())]).await
        }
        EcloudCommand::Vpc(VpcCommand::Show { ids, properties }) => {
            common::show(&client, config, &VPCS, &ids, &properties).await
        }
        EcloudCommand::Instance(InstanceCommand::List { name, vpc, list }) => {
            let shortcuts = [("name", name.as_deref()), ("vpc_id", vpc.as_deref())];
            common::list(&client, config, &INSTANCES, INSTANCES.path, &list, &shortcuts).await
        }
        EcloudCommand::Instance(InstanceCommand::Show { ids, properties }) => {
            common::show(&client, config, &INSTANCES, &ids, &properties).await
        }
        EcloudCommand::Instance(InstanceCommand::Start { ids }) => {
            power_action(&client, &ids, "power-on").await;
            Ok(())
        }
        EcloudCommand::Instance(InstanceCommand::Stop { ids, force }) => {
            let action = if force { "power-off" } else { "power-shutdown" };
            power_action(&client, &ids, action).await;
            Ok(())
        }
    }
}

async fn power_action(client: &AnsClient, ids: &[String], action: &str) -> Vec<String> {
    let path_for = |id: &str| format!("{}/{}", INSTANCES.item_path(id), action);
    common::act_on_each(client, Method::PUT, ids, path_for, &format!("{} instance", action)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_power(server: &MockServer, id: &str, action: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(format!("/ecloud/v2/instances/{}/{}", id, action)))
            .and(header("Authorization", "test-key"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(server)
            .await;
    }

    fn config_for(server: &MockServer) -> Config {
        Config {
            api_key: Some("test-key".to_string()),
            api_uri: server.uri(),
            ..Config::default()
        }
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_power_action_continues_past_failed_instance() {
        let server = MockServer::start().await;
        mount_power(&server, "i-1", "power-on", 202).await;
        mount_power(&server, "i-2", "power-on", 404).await;
        mount_power(&server, "i-3", "power-on", 202).await;

        let client = AnsClient::new(config_for(&server)).unwrap();
        let done = power_action(&client, &ids(&["i-1", "i-2", "i-3"]), "power-on").await;
        assert_eq!(done, ids(&["i-1", "i-3"]));
    }

    #[tokio::test]
    async fn test_stop_uses_shutdown_unless_forced() {
        let server = MockServer::start().await;
        mount_power(&server, "i-1", "power-shutdown", 202).await;
        mount_power(&server, "i-2", "power-off", 202).await;

        let config = config_for(&server);
        let graceful = EcloudArgs {
            command: EcloudCommand::Instance(InstanceCommand::Stop {
                ids: ids(&["i-1"]),
                force: false,
            }),
        };
        execute(&config, graceful).await.unwrap();

        let forced = EcloudArgs {
            command: EcloudCommand::Instance(InstanceCommand::Stop {
                ids: ids(&["i-2"]),
                force: true,
            }),
        };
        execute(&config, forced).await.unwrap();
    }
}
