//! Routing of verified deliveries to the review backend.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use super::types::{wants_review, GithubEvent, IssueCommentPayload, PullRequestPayload};

/// A delivery whose shape does not match its event type.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("{event} payload does not match the expected shape: {source}")]
    Shape {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("pull_request payload has no pull_request.url")]
    MissingPullRequestUrl,

    #[error("issue_comment payload has no comment.body")]
    MissingCommentBody,
}

/// What to do with a verified delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Hand the pull request URL to the PR processor
    ProcessPullRequest { url: String },
    /// Hand the whole payload to the comment handler
    HandleComment,
    /// Acknowledge without doing anything
    Ignore,
}

/// Decide how a delivery is handled.
///
/// `pull_request` deliveries with an `opened` or `synchronize` action go to
/// the PR processor; `issue_comment` deliveries whose body contains
/// `mention` go to the comment handler. Everything else is ignored.
pub fn classify(
    event: &GithubEvent,
    payload: &Value,
    mention: &str,
) -> Result<Dispatch, PayloadError> {
    let dispatch = match event {
        GithubEvent::PullRequest => {
            // Ignored deliveries are never inspected beyond `action`.
            let action = payload.get("action").and_then(|v| v.as_str());

            if wants_review(action) {
                let pr = PullRequestPayload::deserialize(payload).map_err(|source| {
                    PayloadError::Shape {
                        event: "pull_request",
                        source,
                    }
                })?;
                let url = pr
                    .pull_request
                    .and_then(|p| p.url)
                    .ok_or(PayloadError::MissingPullRequestUrl)?;
                Dispatch::ProcessPullRequest { url }
            } else {
                info!(action = ?action, "pull_request_action_ignored");
                Dispatch::Ignore
            }
        }
        GithubEvent::IssueComment => {
            let ic = IssueCommentPayload::deserialize(payload).map_err(|source| {
                PayloadError::Shape {
                    event: "issue_comment",
                    source,
                }
            })?;

            let body = ic
                .comment
                .and_then(|c| c.body)
                .ok_or(PayloadError::MissingCommentBody)?;

            if body.contains(mention) {
                Dispatch::HandleComment
            } else {
                info!(body_length = body.len(), "issue_comment_without_mention");
                Dispatch::Ignore
            }
        }
        GithubEvent::Other(name) => {
            info!(event = %name, "event_not_dispatched");
            Dispatch::Ignore
        }
    };

    Ok(dispatch)
}
