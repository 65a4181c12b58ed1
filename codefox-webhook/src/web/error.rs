//! Webhook failure modes and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::handlers::WebhookResponse;
use crate::events::PayloadError;

/// Every way a webhook delivery can be refused.
///
/// All variants are terminal for the request; nothing is retried here.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Server misconfiguration, not the caller's fault.
    #[error("Webhook secret is not defined")]
    SecretNotConfigured,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Missing GitHub event header")]
    MissingEventHeader,

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),

    #[error("review backend failed: {0:#}")]
    Backend(anyhow::Error),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WebhookError::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::MissingEventHeader => StatusCode::BAD_REQUEST,
            WebhookError::InvalidJson(_)
            | WebhookError::MalformedPayload(_)
            | WebhookError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the caller. Internal failures are not described.
    pub fn public_message(&self) -> String {
        match self {
            WebhookError::InvalidJson(_)
            | WebhookError::MalformedPayload(_)
            | WebhookError::Backend(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "webhook_processing_error");
        }

        (
            status,
            Json(WebhookResponse {
                message: self.public_message(),
            }),
        )
            .into_response()
    }
}
