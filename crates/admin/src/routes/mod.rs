//! HTTP route handlers for the team directory.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health          - Liveness check
//! GET    /health/ready    - Readiness check (database reachable)
//!
//! # Directory (HTMX fragments)
//! GET    /                - Full page with every user
//! GET    /search?q=       - Row collection matching `q` (name or email)
//! POST   /create_dummy    - Quick add, returns the new row
//! GET    /edit/{id}       - Row in edit mode
//! GET    /cancel/{id}     - Row back in view mode
//! POST   /update/{id}     - Save the edit form, returns the row in view mode
//! DELETE /delete/{id}     - Delete, returns an empty body
//! ```

pub mod users;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// All application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(users::router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
