//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cs_section_tools::SearchError;

/// API error type that converts to proper HTTP responses.
///
/// Bodies are structured JSON — offending field, offending value,
/// candidate list, retryability — so tool-calling agents can react
/// without parsing prose.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid '{field}' value '{value}': {message}")]
    InvalidFilter {
        field: String,
        value: String,
        message: String,
    },

    #[error("ambiguous '{field}' value '{value}'")]
    AmbiguousFilter {
        field: String,
        value: String,
        candidates: Vec<String>,
    },

    #[error("keyword must not be empty")]
    InvalidKeyword,

    #[error("search backend unavailable: {0}")]
    Unavailable(String),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidFilterSyntax {
                field,
                value,
                message,
            } => Self::InvalidFilter {
                field,
                value,
                message,
            },
            SearchError::AmbiguousFilterValue {
                field,
                value,
                candidates,
            } => Self::AmbiguousFilter {
                field,
                value,
                candidates,
            },
            SearchError::InvalidKeyword => Self::InvalidKeyword,
            SearchError::NotFound(what) => Self::NotFound(what),
            SearchError::BackendUnavailable(message) => Self::Unavailable(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, mut body) = match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, json!({})),
            ApiError::InvalidKeyword => (StatusCode::BAD_REQUEST, json!({})),
            ApiError::InvalidFilter { field, value, .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "field": field, "value": value }),
            ),
            ApiError::AmbiguousFilter {
                field,
                value,
                candidates,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "field": field, "value": value, "candidates": candidates }),
            ),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, json!({})),
        };

        body["error"] = json!(message);
        body["status"] = json!(status.as_u16());
        body["retryable"] = json!(status == StatusCode::SERVICE_UNAVAILABLE);

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;
