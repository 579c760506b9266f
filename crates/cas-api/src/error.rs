//! # API Error Types
//!
//! Error type for the JSON endpoints (maintenance, health). The USSD
//! callback never uses it: the gateway retries on non-200 responses and
//! shows subscribers a generic network failure, so protocol conditions
//! are always answered 200 with a rendered screen instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Application-level error implementing [`IntoResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or mismatched maintenance secret (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Internal failure (500). Detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Internal(detail) => {
                tracing::error!(detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
