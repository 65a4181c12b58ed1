//! CodeFox webhook receiver.
//!
//! Accepts GitHub webhook deliveries, verifies their HMAC-SHA256 signature
//! and hands review-worthy events to a [`ReviewBackend`].
//!
//! ## Architecture
//!
//! ```text
//! GitHub → POST / → signature check → classify() → ReviewBackend
//!                                                 ├─ process_pr(url)
//!                                                 └─ handle_comment(payload)
//! ```

pub mod backend;
pub mod config;
pub mod events;
pub mod web;

// Re-export commonly used types
pub use backend::{HttpBackend, LogOnlyBackend, ReviewBackend};
pub use config::Config;
pub use events::{classify, Dispatch, GithubEvent};
pub use web::{build_router, AppState, WebhookError};
