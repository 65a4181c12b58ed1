//! Web server module for receiving GitHub webhooks.
//!
//! # Endpoints
//!
//! - `POST /` - GitHub webhook deliveries
//! - `POST /api/webhook` - Same handler, kept for existing hook configurations
//! - `GET /health` - Returns `{"status":"ok"}` while the server is running
//!
//! Webhook bodies above `max_body_bytes` are refused with 413 before the
//! handler runs; other methods get 405 without the body being read.

pub mod error;
pub mod handlers;
pub mod signature;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use error::WebhookError;
pub use handlers::{
    github_webhook, health, method_not_allowed, AppState, HealthResponse, WebhookResponse,
};
pub use signature::{sign_payload, verify_github_signature};

/// Builds the axum Router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/", post(github_webhook).fallback(method_not_allowed))
        .route(
            "/api/webhook",
            post(github_webhook).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
