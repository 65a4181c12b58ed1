//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup and shared read-only afterwards.

use std::env;
use tracing::warn;

/// Mention that triggers the comment handler when no override is set.
pub const DEFAULT_MENTION: &str = "@CodeFox";

/// GitHub refuses to deliver payloads larger than 25 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret used to verify `x-hub-signature-256`
    pub webhook_secret: Option<String>,

    /// Substring of a comment body that routes it to the comment handler
    pub mention: String,

    /// Downstream endpoint that receives pull request URLs
    pub pr_processor_url: Option<String>,

    /// Downstream endpoint that receives full issue_comment payloads
    pub comment_handler_url: Option<String>,

    /// Timeout for downstream calls in milliseconds
    pub request_timeout_ms: u64,

    /// Largest request body accepted on the webhook route
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            webhook_secret: None,
            mention: DEFAULT_MENTION.to_string(),
            pr_processor_url: None,
            comment_handler_url: None,
            request_timeout_ms: 8000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_or("PORT", defaults.port),

            webhook_secret: non_empty("WEBHOOK_SECRET"),

            mention: non_blank("CODEFOX_MENTION").unwrap_or(defaults.mention),

            pr_processor_url: non_blank("PR_PROCESSOR_URL"),

            comment_handler_url: non_blank("COMMENT_HANDLER_URL"),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),

            max_body_bytes: parse_or("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    /// Whether a non-empty webhook secret is configured.
    pub fn has_webhook_secret(&self) -> bool {
        self.webhook_secret
            .as_ref()
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or malformed.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Read an environment variable, treating blank values as unset.
fn non_blank(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read an environment variable verbatim; only the empty string counts as
/// unset. Secrets are HMAC keys, so whitespace is part of the key.
fn non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
