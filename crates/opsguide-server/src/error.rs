//! HTTP error responses
//!
//! Validation failures (bad headers, malformed payloads) belong to this
//! layer, not the core: the classifier and extractor have no error
//! outcomes. Every error renders as the documented JSON shape
//! `{error, status_code, timestamp}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by the HTTP layer
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required header was absent
    #[error("Missing {0} header")]
    MissingHeader(&'static str),

    /// Authorization header present but not a bearer token
    #[error("Invalid Authorization format. Use 'Bearer <token>'")]
    InvalidAuthorization,

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// HTTP status for this error
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingHeader(_)
            | AppError::InvalidAuthorization
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = %status, error = %self, "request rejected");

        let body = json!({
            "error": self.to_string(),
            "status_code": status.as_u16(),
            "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        });
        (status, Json(body)).into_response()
    }
}
