//! # Session Maintenance
//!
//! /debug/clear_sessions — wipes the in-memory session store. Guarded by
//! the `USSD_DEBUG_SECRET` environment secret, presented either in the
//! `X-USSD-SECRET` header or the `?secret=` query parameter. With no
//! secret configured the endpoint is disabled outright.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the maintenance secret.
pub const SECRET_HEADER: &str = "x-ussd-secret";

#[derive(Debug, Deserialize)]
pub struct ClearSessionsQuery {
    pub secret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearSessionsResponse {
    pub status: &'static str,
    pub sessions_cleared: usize,
}

/// GET/POST /debug/clear_sessions
pub async fn clear_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ClearSessionsQuery>,
) -> Result<Json<ClearSessionsResponse>, AppError> {
    let Some(expected) = &state.debug_secret else {
        return Err(AppError::Unauthorized);
    };

    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or(query.secret);

    match provided {
        Some(provided) if secret_matches(expected, &provided) => {}
        _ => return Err(AppError::Unauthorized),
    }

    let sessions_cleared = state.sessions.clear();
    tracing::info!(sessions_cleared, "session store cleared via maintenance endpoint");
    Ok(Json(ClearSessionsResponse {
        status: "cleared",
        sessions_cleared,
    }))
}

/// Constant-time secret comparison.
fn secret_matches(expected: &str, provided: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
