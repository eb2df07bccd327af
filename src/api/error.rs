//! API client errors

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::pagination::PaginationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    PageLimit(#[from] PaginationError),
}
