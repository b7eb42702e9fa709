//! Liveness endpoint.

use axum::{Router, routing::get};

/// Builds the router serving `GET /health`.
#[must_use]
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
