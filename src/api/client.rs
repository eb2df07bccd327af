//! HTTP client for the ANS API

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::api::error::ApiError;
use crate::api::pagination::{self, FetchAllOptions, Page};
use crate::api::params::RequestParameters;
use crate::api::response::{ApiResponse, ErrorResponse};
use crate::config::Config;

const USER_AGENT: &str = concat!("ans-cli/", env!("CARGO_PKG_VERSION"));

/// ANS API client
pub struct AnsClient {
    client: Client,
    config: Config,
}

impl AnsClient {
    /// Create a new API client
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build request with authentication headers
    fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));

        for (key, value) in self.config.auth_headers() {
            req = req.header(key, value);
        }

        req.header("Accept", "application/json")
    }

    /// Read the body, turning non-2xx statuses into [`ApiError::Status`]
    async fn read_body(response: Response) -> Result<String, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        trace!("Response ({}): {}", status, text);

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .ok()
                .and_then(|e| e.summary())
                .unwrap_or(text);
            return Err(ApiError::Status { status, message });
        }

        Ok(text)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<ApiResponse<T>, ApiError> {
        let response = req.send().await?;
        let text = Self::read_body(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GET a single resource and return its `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!("GET {}", path);
        let response = self.send(self.build_request(Method::GET, path)).await?;
        Ok(response.data)
    }

    /// GET one page of a list endpoint
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &RequestParameters,
    ) -> Result<Page<T>, ApiError> {
        let query = params.to_query();
        debug!("GET {} {:?}", path, query);

        let response: ApiResponse<Vec<T>> = self
            .send(self.build_request(Method::GET, path).query(&query))
            .await?;

        let metadata = response.meta.pagination.unwrap_or_default();
        debug!(
            "Page {}/{}: {} items ({} per page, {} total)",
            metadata.current_page, metadata.total_pages, metadata.count, metadata.per_page, metadata.total
        );

        Ok(Page {
            items: response.data,
            metadata,
        })
    }

    /// GET every page of a list endpoint
    pub async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &RequestParameters,
    ) -> Result<Vec<T>, ApiError> {
        let options = FetchAllOptions {
            max_pages: self.config.max_pages,
        };

        pagination::fetch_all(params, options, |page_params| async move {
            self.get_page(path, &page_params).await
        })
        .await
    }

    /// Send an arbitrary request and return the decoded body
    pub async fn request_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        debug!("{} (raw) {}", method, path);

        let mut req = self.build_request(method, path);
        if let Some(body) = body {
            debug!("Request body: {}", body);
            req = req.json(&body);
        }

        let text = Self::read_body(req.send().await?).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
