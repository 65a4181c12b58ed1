//! Backend that records dispatches in the log and nothing else.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use super::ReviewBackend;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyBackend;

#[async_trait]
impl ReviewBackend for LogOnlyBackend {
    async fn process_pr(&self, pr_url: &str) -> Result<()> {
        info!(pr_url = %pr_url, "log_only_process_pr");
        Ok(())
    }

    async fn handle_comment(&self, payload: &Value) -> Result<()> {
        let issue_url = payload.pointer("/issue/url").and_then(|v| v.as_str());
        info!(
            comment_id = ?payload.pointer("/comment/id"),
            issue_url = ?issue_url,
            "log_only_handle_comment"
        );
        Ok(())
    }
}
