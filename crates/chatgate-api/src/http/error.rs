//! Application error type mapping to HTTP status codes.
//!
//! The chat endpoint never exposes upstream provider details: a model
//! fault already degraded to a fallback reply before reaching this layer,
//! so the only error responses are rate-limit rejections, invalid history
//! ids, and storage-backed server faults.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatgate_types::error::StorageError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Quota exceeded; carries the window length for the retry hint.
    RateLimited { retry_after: Duration },
    /// Malformed session id on a history lookup.
    InvalidSessionId,
    /// Storage fault (or any other unhandled pipeline failure).
    Internal,
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        tracing::error!(error = %e, "storage fault in request pipeline");
        AppError::Internal
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Please try again later.",
            ),
            AppError::InvalidSessionId => (StatusCode::BAD_REQUEST, "Invalid session id."),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error."),
        };

        let body = json!({ "detail": detail }).to_string();
        let mut response = (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        if let AppError::RateLimited { retry_after } = self {
            if let Ok(value) = retry_after.as_secs().to_string().parse() {
                response
                    .headers_mut()
                    .insert(axum::http::header::RETRY_AFTER, value);
            }
        }

        response
    }
}
