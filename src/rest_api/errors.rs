//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::query::{PipelineError, QueryError};
use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Querystring could not be interpreted
    #[error("{0}")]
    InvalidQuery(#[from] QueryError),

    /// Document or collection not found
    #[error("{0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure
    #[error("{0}")]
    Store(StoreError),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound(_) => StatusCode::NOT_FOUND,
            RestError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            RestError::NotFound(err.to_string())
        } else {
            RestError::Store(err)
        }
    }
}

impl From<PipelineError> for RestError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Query(e) => RestError::InvalidQuery(e),
            PipelineError::Store(e) => RestError::from(e),
        }
    }
}

/// Error response body, `{"status": "error", "message": ...}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            status: "error",
            message: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::InvalidQuery(QueryError::MalformedKey("a[".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Store(StoreError::LockPoisoned("tools".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = RestError::from(StoreError::DocumentNotFound {
            collection: "Tool".to_string(),
            field: "id".to_string(),
            value: "42".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Tool not found with id of 42");
    }

    #[test]
    fn test_pipeline_errors_keep_their_class() {
        let query = RestError::from(PipelineError::Query(QueryError::ConflictingKey(
            "rating".to_string(),
        )));
        assert_eq!(query.status_code(), StatusCode::BAD_REQUEST);

        let store = RestError::from(PipelineError::Store(StoreError::LockPoisoned(
            "tools".to_string(),
        )));
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body() {
        let body = ErrorResponse::from(RestError::NotFound("gone".to_string()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "gone"}));
    }
}
