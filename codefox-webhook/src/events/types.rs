//! GitHub webhook event and payload types.
//!
//! Only the fields the receiver routes on are modelled. Everything else in
//! the payload is passed through untouched as `serde_json::Value`.

use serde::Deserialize;

/// Event name for pull request activity.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Event name for comments on issues and pull requests.
pub const ISSUE_COMMENT_EVENT: &str = "issue_comment";

/// Pull request actions that trigger a review.
pub const REVIEW_ACTIONS: &[&str] = &["opened", "synchronize"];

/// Event type carried in the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GithubEvent {
    PullRequest,
    IssueComment,
    /// Any event the receiver acknowledges without dispatching
    Other(String),
}

impl GithubEvent {
    pub fn from_header(value: &str) -> Self {
        match value {
            PULL_REQUEST_EVENT => GithubEvent::PullRequest,
            ISSUE_COMMENT_EVENT => GithubEvent::IssueComment,
            other => GithubEvent::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GithubEvent::PullRequest => PULL_REQUEST_EVENT,
            GithubEvent::IssueComment => ISSUE_COMMENT_EVENT,
            GithubEvent::Other(name) => name,
        }
    }
}

/// Fields of a `pull_request` delivery.
#[derive(Debug, Deserialize)]
pub struct PullRequestPayload {
    /// `opened`, `synchronize`, `closed`, ... (absent on malformed deliveries)
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestRef>,
}

/// Whether a `pull_request` action asks for a (re-)review.
///
/// Non-string and absent actions never do.
pub fn wants_review(action: Option<&str>) -> bool {
    action.map(|a| REVIEW_ACTIONS.contains(&a)).unwrap_or(false)
}

#[derive(Debug, Deserialize)]
pub struct PullRequestRef {
    /// API URL of the pull request
    #[serde(default)]
    pub url: Option<String>,
}

/// Fields of an `issue_comment` delivery.
#[derive(Debug, Deserialize)]
pub struct IssueCommentPayload {
    #[serde(default)]
    pub comment: Option<CommentRef>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRef {
    /// Markdown body of the comment
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_header() {
        assert_eq!(GithubEvent::from_header("pull_request"), GithubEvent::PullRequest);
        assert_eq!(GithubEvent::from_header("issue_comment"), GithubEvent::IssueComment);
        assert_eq!(
            GithubEvent::from_header("ping"),
            GithubEvent::Other("ping".to_string())
        );
        assert_eq!(GithubEvent::from_header("ping").as_str(), "ping");
    }

    #[test]
    fn test_pull_request_payload_deserialization() {
        let json = r#"{
            "action": "synchronize",
            "number": 7,
            "pull_request": {"url": "https://api.example/pr/7", "title": "Fix"}
        }"#;

        let payload: PullRequestPayload = serde_json::from_str(json).unwrap();
        assert!(wants_review(payload.action.as_deref()));
        assert_eq!(
            payload.pull_request.unwrap().url.as_deref(),
            Some("https://api.example/pr/7")
        );
    }

    #[test]
    fn test_wants_review() {
        assert!(wants_review(Some("opened")));
        assert!(wants_review(Some("synchronize")));
        for action in ["closed", "edited", "reopened", "Opened"] {
            assert!(!wants_review(Some(action)), "{} should not trigger review", action);
        }
        assert!(!wants_review(None));
    }

    #[test]
    fn test_issue_comment_payload_minimal() {
        let payload: IssueCommentPayload = serde_json::from_str(r#"{"action": "created"}"#).unwrap();
        assert!(payload.comment.is_none());
    }
}
