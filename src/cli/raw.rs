//! Raw API command

use anyhow::{anyhow, Result};
use clap::Args;
use reqwest::Method;
use serde_json::Value;

use crate::api::AnsClient;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RawArgs {
    /// API path (e.g., ecloud/v2/vpcs)
    pub path: String,

    /// HTTP method
    #[arg(short, long, default_value = "GET")]
    pub method: String,

    /// Request body (JSON)
    #[arg(short, long)]
    pub body: Option<String>,
}

pub async fn execute(config: &Config, args: RawArgs) -> Result<()> {
    let client = AnsClient::new(config.clone())?;

    let method = parse_method(&args.method)?;
    let body: Option<Value> = args
        .body
        .as_ref()
        .map(|b| serde_json::from_str(b))
        .transpose()?;

    let has_body = method == Method::POST || method == Method::PUT || method == Method::PATCH;
    let body = match body {
        Some(_) if !has_body => {
            output::warning(&format!("Ignoring request body for {}", method));
            None
        }
        None if has_body => Some(Value::Object(Default::default())),
        body => body,
    };

    let response = client.request_raw(method, &args.path, body).await?;

    output::print_output(&response, &config.output_format)?;

    Ok(())
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => Err(anyhow!("Unsupported HTTP method: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("patch").unwrap(), Method::PATCH);
        assert!(parse_method("TRACE").is_err());
    }
}
