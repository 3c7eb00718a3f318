//! API error mapping
//!
//! Converts domain errors into HTTP responses. Store outages surface as 503
//! so the annotator sees an explicit failure rather than a false success.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::DomainError;

/// HTTP-facing error wrapper
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DomainError::StoreRead(_) | DomainError::StoreWrite(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            DomainError::DatasetLoad(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
