//! Webhook endpoint handlers.
//!
//! The GitHub handler is a straight line of gates:
//! 1. Method must be POST (see [`method_not_allowed`])
//! 2. A webhook secret must be configured
//! 3. The signature must match the raw body
//! 4. The event header must be present
//! 5. The delivery is classified and, if relevant, dispatched
//!
//! Every failure maps to a fixed status; see [`WebhookError`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::ReviewBackend;
use crate::events::{classify, Dispatch, GithubEvent};
use crate::web::error::WebhookError;
use crate::web::signature::verify_github_signature;
use crate::Config;

/// Header carrying the HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";
/// Header carrying the event type.
pub const HEADER_EVENT: &str = "x-github-event";
/// Header carrying GitHub's delivery GUID (logged only).
pub const HEADER_DELIVERY: &str = "x-github-delivery";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn ReviewBackend>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn ReviewBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// GitHub Webhook
// =============================================================================

/// Webhook response body, for successes and failures alike.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub message: String,
}

/// Method fallback for the webhook routes.
///
/// Runs instead of [`github_webhook`] for anything but POST, before the
/// body is read, so non-POST requests always get the JSON 405.
pub async fn method_not_allowed(method: Method) -> WebhookError {
    warn!(method = %method, "webhook_method_not_allowed");
    WebhookError::MethodNotAllowed
}

/// GitHub webhook endpoint (POST only).
pub async fn github_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let delivery_id = header_str(&headers, HEADER_DELIVERY).unwrap_or("");

    info!(
        delivery_id = %delivery_id,
        body_length = body.len(),
        "webhook_received"
    );

    let secret = match state.config.webhook_secret.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => {
            warn!(delivery_id = %delivery_id, "webhook_secret_not_configured");
            return Err(WebhookError::SecretNotConfigured);
        }
    };

    // Verify against the bytes GitHub signed, before any parsing.
    let signature = header_str(&headers, HEADER_SIGNATURE).unwrap_or("");
    if !verify_github_signature(secret, &body, signature) {
        warn!(delivery_id = %delivery_id, "webhook_signature_invalid");
        return Err(WebhookError::InvalidSignature);
    }

    let event = match header_str(&headers, HEADER_EVENT).filter(|e| !e.is_empty()) {
        Some(e) => GithubEvent::from_header(e),
        None => {
            warn!(delivery_id = %delivery_id, "webhook_event_header_missing");
            return Err(WebhookError::MissingEventHeader);
        }
    };

    let payload: Value = serde_json::from_slice(&body)?;

    let dispatch = classify(&event, &payload, &state.config.mention)?;

    info!(
        delivery_id = %delivery_id,
        event = %event.as_str(),
        dispatch = ?dispatch,
        "webhook_dispatch"
    );

    match dispatch {
        Dispatch::ProcessPullRequest { url } => {
            state
                .backend
                .process_pr(&url)
                .await
                .map_err(WebhookError::Backend)?;
        }
        Dispatch::HandleComment => {
            state
                .backend
                .handle_comment(&payload)
                .await
                .map_err(WebhookError::Backend)?;
        }
        Dispatch::Ignore => {}
    }

    info!(delivery_id = %delivery_id, event = %event.as_str(), "webhook_handled");

    Ok(Json(WebhookResponse {
        message: "Received".to_string(),
    }))
}

/// Header value as a string; absent and non-ASCII values are both `None`.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
