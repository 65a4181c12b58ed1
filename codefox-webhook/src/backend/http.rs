//! Backend that forwards dispatches to downstream HTTP services.
//!
//! - PR processor: `POST {PR_PROCESSOR_URL}` with `{"url": "<pull request API URL>"}`
//! - Comment handler: `POST {COMMENT_HANDLER_URL}` with the full webhook payload
//!
//! A downstream that is not configured turns the call into a logged no-op.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use super::ReviewBackend;
use crate::Config;

/// Body sent to the PR processor.
#[derive(Debug, Serialize)]
struct ProcessPrRequest<'a> {
    url: &'a str,
}

/// HTTP forwarding backend sharing one connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    pr_processor_url: Option<String>,
    comment_handler_url: Option<String>,
    timeout: Duration,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);

        let client = Client::builder()
            .user_agent(concat!("codefox-webhook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            pr_processor_url: config.pr_processor_url.clone(),
            comment_handler_url: config.comment_handler_url.clone(),
            timeout,
        })
    }

    /// POST a JSON body and require a 2xx reply.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        target: &'static str,
        url: &str,
        body: &T,
    ) -> Result<()> {
        info!(
            target_name = target,
            url = url,
            timeout_seconds = self.timeout.as_secs_f64(),
            "backend_forward_starting"
        );

        let resp = match self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_timeout() {
                    error!(target_name = target, url = url, error = %e, "backend_forward_timeout");
                } else {
                    error!(target_name = target, url = url, error = %e, "backend_forward_error");
                }
                return Err(e).with_context(|| format!("Failed to reach {}", target));
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(
                target_name = target,
                url = url,
                status_code = status.as_u16(),
                "backend_forward_rejected"
            );
            return Err(anyhow!("{} responded with {}", target, status));
        }

        info!(
            target_name = target,
            status_code = status.as_u16(),
            "backend_forward_complete"
        );

        Ok(())
    }
}

#[async_trait]
impl ReviewBackend for HttpBackend {
    async fn process_pr(&self, pr_url: &str) -> Result<()> {
        match &self.pr_processor_url {
            Some(url) => {
                self.post_json("pr_processor", url, &ProcessPrRequest { url: pr_url })
                    .await
            }
            None => {
                warn!(pr_url = %pr_url, "pr_processor_not_configured");
                Ok(())
            }
        }
    }

    async fn handle_comment(&self, payload: &Value) -> Result<()> {
        match &self.comment_handler_url {
            Some(url) => self.post_json("comment_handler", url, payload).await,
            None => {
                warn!("comment_handler_not_configured");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    type Received = Arc<Mutex<Vec<Value>>>;

    async fn record(State(received): State<Received>, Json(body): Json<Value>) -> StatusCode {
        received.lock().unwrap().push(body);
        StatusCode::ACCEPTED
    }

    async fn reject() -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    /// Start a downstream stub on an ephemeral port and return its base URL.
    async fn spawn_downstream() -> (String, Received) {
        let received: Received = Arc::default();
        let app = Router::new()
            .route("/review", post(record))
            .route("/chat", post(record))
            .route("/down", post(reject))
            .with_state(received.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), received)
    }

    fn backend(pr: Option<String>, comment: Option<String>) -> HttpBackend {
        let config = Config {
            pr_processor_url: pr,
            comment_handler_url: comment,
            request_timeout_ms: 2000,
            ..Config::default()
        };
        HttpBackend::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_process_pr_forwards_url() {
        let (base, received) = spawn_downstream().await;
        let backend = backend(Some(format!("{}/review", base)), None);

        backend.process_pr("https://api.example/pr/1").await.unwrap();

        let calls = received.lock().unwrap().clone();
        assert_eq!(calls, vec![json!({"url": "https://api.example/pr/1"})]);
    }

    #[tokio::test]
    async fn test_handle_comment_forwards_full_payload() {
        let (base, received) = spawn_downstream().await;
        let backend = backend(None, Some(format!("{}/chat", base)));
        let payload = json!({
            "action": "created",
            "comment": {"body": "hello @CodeFox please review"}
        });

        backend.handle_comment(&payload).await.unwrap();

        let calls = received.lock().unwrap().clone();
        assert_eq!(calls, vec![payload]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (base, _received) = spawn_downstream().await;
        let backend = backend(Some(format!("{}/down", base)), None);

        let err = backend.process_pr("https://api.example/pr/1").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_unconfigured_targets_are_noops() {
        let backend = backend(None, None);

        assert!(backend.process_pr("https://api.example/pr/1").await.is_ok());
        assert!(backend.handle_comment(&json!({})).await.is_ok());
    }
}
