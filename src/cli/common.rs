//! Shared list/show plumbing used by every resource command

use anyhow::Result;
use clap::Args;
use reqwest::Method;
use serde_json::Value;

use crate::api::filter::{infer_filter_operator, parse_filter_clause, parse_sort_clause};
use crate::api::{AnsClient, RequestParameters};
use crate::config::Config;
use crate::output;

/// A listable API resource
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    /// Human readable name used in messages
    pub name: &'static str,
    /// Collection path, e.g. `ecloud/v2/vpcs`
    pub path: &'static str,
    /// Default table columns
    pub columns: &'static [&'static str],
}

impl Resource {
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

/// Flags shared by every `list` command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Filter results: property[:operator]=value[,value...] (repeatable)
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Sort results: property[:desc]
    #[arg(long)]
    pub sort: Option<String>,

    /// Fetch only this page instead of every page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// Number of items per page
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub per_page: Option<u32>,

    /// Columns to show in table output (repeatable)
    #[arg(long = "property", value_name = "PROPERTY")]
    pub properties: Vec<String>,
}

impl ListArgs {
    /// Build request parameters from the flags. Shortcut flags such as
    /// `--name` are passed in `shortcuts` as property/value pairs.
    pub fn to_params(&self, config: &Config, shortcuts: &[(&str, Option<&str>)]) -> Result<RequestParameters> {
        let mut params = RequestParameters::new();

        for raw in &self.filters {
            params = params.with_filter(parse_filter_clause(raw)?);
        }

        for (property, value) in shortcuts {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                params = params.with_filter(infer_filter_operator(property, value));
            }
        }

        if let Some(ref sort) = self.sort {
            params = params.with_sort(parse_sort_clause(sort));
        }

        let per_page = self.per_page.unwrap_or(config.per_page);
        params = params.with_pagination(self.page.unwrap_or(1), per_page);

        Ok(params)
    }
}

/// List a resource: one page with `--page`, every page otherwise
pub async fn list(
    client: &AnsClient,
    config: &Config,
    resource: &Resource,
    path: &str,
    args: &ListArgs,
    shortcuts: &[(&str, Option<&str>)],
) -> Result<()> {
    let params = args.to_params(config, shortcuts)?;

    let items: Vec<Value> = match args.page {
        Some(_) => client.get_page(path, &params).await?.items,
        None => client.get_all(path, &params).await?,
    };

    output::print_list(&items, resource.columns, &args.properties, &config.output_format)
}

/// Fetch each identifier in turn; failures are reported and skipped
pub async fn fetch_each(client: &AnsClient, resource: &Resource, ids: &[String]) -> Vec<Value> {
    let mut items = Vec::with_capacity(ids.len());

    for id in ids {
        match client.get::<Value>(&resource.item_path(id)).await {
            Ok(item) => items.push(item),
            Err(e) => output::error(&format!("Error retrieving {} [{}]: {}", resource.name, id, e)),
        }
    }

    items
}

/// Send a body-less `method` request for each identifier in turn. Failures
/// are reported and skipped; the identifiers that succeeded are returned.
pub async fn act_on_each<F>(
    client: &AnsClient,
    method: Method,
    ids: &[String],
    path_for: F,
    action: &str,
) -> Vec<String>
where
    F: Fn(&str) -> String,
{
    let mut done = Vec::with_capacity(ids.len());

    for id in ids {
        match client.request_raw(method.clone(), &path_for(id), None).await {
            Ok(_) => {
                output::success(&format!("{} [{}]: requested", action, id));
                done.push(id.clone());
            }
            Err(e) => output::error(&format!("Error running {} [{}]: {}", action, id, e)),
        }
    }

    done
}

/// Show one or more resources by identifier
pub async fn show(
    client: &AnsClient,
    config: &Config,
    resource: &Resource,
    ids: &[String],
    properties: &[String],
) -> Result<()> {
    let items = fetch_each(client, resource, ids).await;
    output::print_list(&items, resource.columns, properties, &config.output_format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::filter::FilterOperator;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WIDGETS: Resource = Resource {
        name: "widget",
        path: "test/v1/widgets",
        columns: &["id"],
    };

    #[test]
    fn test_to_params_combines_flags() {
        let args = ListArgs {
            filters: vec!["status:neq=deleted".to_string(), "".to_string()],
            sort: Some("name:desc".to_string()),
            ..Default::default()
        };

        let params = args
            .to_params(&Config::default(), &[("name", Some("web*")), ("vpc_id", None)])
            .unwrap();

        assert_eq!(params.filtering.len(), 2);
        assert_eq!(params.filtering[0].operator, FilterOperator::Neq);
        assert_eq!(params.filtering[1].property, "name");
        assert_eq!(params.filtering[1].operator, FilterOperator::Lk);
        assert!(params.sorting.unwrap().descending);
        let pagination = params.pagination.unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, Config::default().per_page);
    }

    #[test]
    fn test_to_params_rejects_bad_filter() {
        let args = ListArgs {
            filters: vec!["name:bogus=x".to_string()],
            ..Default::default()
        };

        let err = args.to_params(&Config::default(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "invalid filtering operator 'bogus'");
    }

    #[test]
    fn test_to_params_skips_empty_shortcuts() {
        let params = ListArgs::default()
            .to_params(&Config::default(), &[("name", Some("")), ("vpc_id", Some("vpc-1"))])
            .unwrap();

        assert_eq!(params.filtering.len(), 1);
        assert_eq!(params.filtering[0].property, "vpc_id");
        assert_eq!(params.filtering[0].values, vec!["vpc-1".to_string()]);
    }

    #[tokio::test]
    async fn test_act_on_each_continues_after_failure() {
        let server = MockServer::start().await;
        for (id, status) in [("1", 202u16), ("2", 404), ("3", 204)] {
            Mock::given(method("DELETE"))
                .and(path(format!("/test/v1/widgets/{}", id)))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&server)
                .await;
        }

        let config = Config {
            api_key: Some("k".to_string()),
            api_uri: server.uri(),
            ..Config::default()
        };
        let client = AnsClient::new(config).unwrap();
        let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();

        let done = act_on_each(&client, Method::DELETE, &ids, |id| WIDGETS.item_path(id), "delete widget").await;
        assert_eq!(done, vec!["1".to_string(), "3".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_each_skips_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test/v1/widgets/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 1}})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test/v1/widgets/2"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/test/v1/widgets/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 3}})))
            .mount(&server)
            .await;

        let config = Config {
            api_key: Some("k".to_string()),
            api_uri: server.uri(),
            ..Config::default()
        };
        let client = AnsClient::new(config).unwrap();
        let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();

        let items = fetch_each(&client, &WIDGETS, &ids).await;
        assert_eq!(items, vec![json!({"id": 1}), json!({"id": 3})]);
    }
}
