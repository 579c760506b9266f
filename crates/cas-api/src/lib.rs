//! # cas-api — Axum HTTP Surface for the Climate Alert Stack
//!
//! Thin transport layer over [`cas_router`]: decode the gateway's form
//! callback, run the state machine, encode the `CON`/`END` reply.
//!
//! ## API Surface
//!
//! | Route                    | Module                    | Notes                         |
//! |--------------------------|---------------------------|-------------------------------|
//! | `POST /ussd`             | [`routes::ussd`]          | Gateway callback, text/plain  |
//! | `GET/POST /debug/clear_sessions` | [`routes::maintenance`] | Secret-guarded, JSON |
//! | `GET /health/liveness`   | here                      | Unconditional 200             |
//! | `GET /health/readiness`  | here                      | Store accessibility check     |
//!
//! The callback route always answers 200 with a rendered screen; only the
//! JSON endpoints use HTTP status codes for outcomes.

pub mod error;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/ussd", post(routes::ussd::callback))
        .route(
            "/debug/clear_sessions",
            get(routes::maintenance::clear_sessions).post(routes::maintenance::clear_sessions),
        )
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe: 200 while the process runs.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: verifies the session store lock is acquirable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let _ = state.sessions.len();
    (StatusCode::OK, "ready")
}
