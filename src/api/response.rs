//! API response types

use serde::{Deserialize, Serialize};

use crate::api::pagination::PaginationMetadata;

/// Standard response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub meta: ResponseMeta,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ResponseMeta {
    #[serde(default)]
    pub pagination: Option<PaginationMetadata>,
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

impl ErrorResponse {
    /// Join every error as `title: detail`
    pub fn summary(&self) -> Option<String> {
        let errors: Vec<String> = self
            .errors
            .iter()
            .map(|e| match (e.title.is_empty(), e.detail.is_empty()) {
                (false, false) => format!("{}: {}", e.title, e.detail),
                (true, false) => e.detail.clone(),
                _ => e.title.clone(),
            })
            .filter(|s| !s.is_empty())
            .collect();

        if !errors.is_empty() {
            Some(errors.join(", "))
        } else {
            self.message.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_decode_list_envelope() {
        let body = r#"{
            "data": [{"id": "vpc-1"}, {"id": "vpc-2"}],
            "meta": {"pagination": {"total": 12, "count": 2, "per_page": 2,
                     "current_page": 1, "total_pages": 6, "links": {"next": null}}}
        }"#;

        let response: ApiResponse<Vec<Value>> = serde_json::from_str(body).unwrap();
        let pagination = response.meta.pagination.unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(pagination.total_pages, 6);
        assert_eq!(pagination.total, 12);
    }

    #[test]
    fn test_decode_single_without_meta() {
        let response: ApiResponse<Value> =
            serde_json::from_str(r#"{"data": {"id": 1}}"#).unwrap();
        assert!(response.meta.pagination.is_none());
        assert_eq!(response.data["id"], 1);
    }

    #[test]
    fn test_error_summary() {
        let body = r#"{"errors": [
            {"title": "Not found", "detail": "Instance 'i-1' not found", "status": 404},
            {"title": "Forbidden", "detail": ""}
        ]}"#;

        let response: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.summary().unwrap(),
            "Not found: Instance 'i-1' not found, Forbidden"
        );
    }

    #[test]
    fn test_error_summary_falls_back_to_message() {
        let response: ErrorResponse =
            serde_json::from_str(r#"{"message": "Unauthenticated."}"#).unwrap();
        assert_eq!(response.summary().unwrap(), "Unauthenticated.");
    }
}
