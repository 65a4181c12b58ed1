//! Test backend that remembers every call.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::ReviewBackend;

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub pr_calls: Mutex<Vec<String>>,
    pub comment_calls: Mutex<Vec<Value>>,
    pub fail: bool,
}

impl RecordingBackend {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn pr_calls(&self) -> Vec<String> {
        self.pr_calls.lock().unwrap().clone()
    }

    pub fn comment_calls(&self) -> Vec<Value> {
        self.comment_calls.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.pr_calls().len() + self.comment_calls().len()
    }
}

#[async_trait]
impl ReviewBackend for RecordingBackend {
    async fn process_pr(&self, pr_url: &str) -> Result<()> {
        self.pr_calls.lock().unwrap().push(pr_url.to_string());
        if self.fail {
            bail!("pr processor unavailable");
        }
        Ok(())
    }

    async fn handle_comment(&self, payload: &Value) -> Result<()> {
        self.comment_calls.lock().unwrap().push(payload.clone());
        if self.fail {
            bail!("comment handler unavailable");
        }
        Ok(())
    }
}
