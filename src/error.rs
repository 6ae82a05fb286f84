//! Error types for the company search service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::metrics;

/// Message returned when the `q` parameter is absent or empty.
pub const MISSING_QUERY_MESSAGE: &str = "Missing q (query) parameter";

/// Message returned for any failure the client is not told the details of.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Error";

/// Service-level errors that can occur during operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Company data file not found: {0}")]
    CompanyFileNotFound(String),

    #[error("Failed to load company data: {0}")]
    CompanyLoadError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// The request was missing a usable `q` parameter.
    pub fn missing_query() -> Self {
        ServiceError::InvalidRequest(MISSING_QUERY_MESSAGE.to_string())
    }

    /// HTTP status this error is surfaced with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::CompanyFileNotFound(_)
            | ServiceError::CompanyLoadError(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ServiceError::InvalidRequest(msg) => msg,
            _ => {
                metrics::increment_search_errors();
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
