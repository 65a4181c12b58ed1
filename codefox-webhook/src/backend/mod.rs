//! Review backends: the collaborators that do the actual work.
//!
//! The webhook receiver only decides *whether* to call a collaborator and
//! with what input. Reviewing a pull request or answering a comment
//! happens behind [`ReviewBackend`].

pub mod http;
pub mod log_only;

#[cfg(test)]
pub(crate) mod recording;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::Config;

pub use http::HttpBackend;
pub use log_only::LogOnlyBackend;

/// External collaborators invoked for dispatched deliveries.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Review the pull request at `pr_url` (its API URL).
    async fn process_pr(&self, pr_url: &str) -> Result<()>;

    /// Respond to an `issue_comment` delivery; receives the full payload.
    async fn handle_comment(&self, payload: &Value) -> Result<()>;
}

/// Build the backend described by the configuration.
///
/// Forwards over HTTP when at least one downstream URL is configured,
/// otherwise only logs what would have been dispatched.
pub fn from_config(config: &Config) -> Result<Arc<dyn ReviewBackend>> {
    if config.pr_processor_url.is_none() && config.comment_handler_url.is_none() {
        info!(backend = "log_only", "review_backend_selected");
        return Ok(Arc::new(LogOnlyBackend));
    }

    info!(
        backend = "http",
        pr_processor_configured = config.pr_processor_url.is_some(),
        comment_handler_configured = config.comment_handler_url.is_some(),
        "review_backend_selected"
    );
    Ok(Arc::new(HttpBackend::new(config)?))
}
