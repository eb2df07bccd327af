//! Paginated fetch-all traversal

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::params::RequestParameters;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page limit of {limit} exceeded while fetching all results")]
    PageLimitExceeded { limit: u32 },
}

/// Server-reported pagination counts for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

impl Default for PaginationMetadata {
    fn default() -> Self {
        Self {
            total: 0,
            count: 0,
            per_page: 0,
            current_page: 0,
            total_pages: default_total_pages(),
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PaginationMetadata,
}

/// `max_pages` of `None` trusts the server's page count without a bound
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchAllOptions {
    pub max_pages: Option<u32>,
}

/// Fetch every page, starting at page 1, until the server-reported page
/// count is exhausted.
///
/// `total_pages` is re-read from every page. The first fetch error stops the
/// traversal and is returned unchanged; items gathered so far are dropped.
pub async fn fetch_all<T, E, F, Fut>(
    params: &RequestParameters,
    options: FetchAllOptions,
    mut fetch_page: F,
) -> Result<Vec<T>, E>
where
    F: FnMut(RequestParameters) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    E: From<PaginationError>,
{
    let mut items = Vec::new();
    let mut current_page: u32 = 1;
    let mut total_pages: u32 = 1;

    while current_page <= total_pages {
        if let Some(limit) = options.max_pages {
            if current_page > limit {
                return Err(PaginationError::PageLimitExceeded { limit }.into());
            }
        }

        let mut page_params = params.clone();
        page_params.set_page(current_page);

        debug!("Fetching page {} of {}", current_page, total_pages);
        let page = fetch_page(page_params).await?;

        items.extend(page.items);
        total_pages = page.metadata.total_pages;
        current_page += 1;
    }

    Ok(items)
}
