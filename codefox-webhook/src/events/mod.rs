//! GitHub event classification.
//!
//! ## Processing Flow
//!
//! ```text
//! X-GitHub-Event + JSON body → classify() → Dispatch → ReviewBackend
//! ```

pub mod dispatch;
pub mod types;

pub use dispatch::{classify, Dispatch, PayloadError};
pub use types::{
    wants_review, GithubEvent, IssueCommentPayload, PullRequestPayload, ISSUE_COMMENT_EVENT,
    PULL_REQUEST_EVENT, REVIEW_ACTIONS,
};
