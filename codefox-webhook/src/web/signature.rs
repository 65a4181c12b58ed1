//! GitHub webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw request body,
//! keyed by the webhook secret, and sends it as `sha256=<hex digest>` in the
//! `X-Hub-Signature-256` header.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Prefix GitHub puts in front of the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Compute the `X-Hub-Signature-256` header value for a payload.
///
/// Returns `None` only if the HMAC cannot be keyed, which HMAC-SHA256 never
/// refuses in practice.
pub fn sign_payload(secret: &str, payload: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(payload);
    Some(format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Verify a GitHub webhook signature.
///
/// # Arguments
///
/// * `secret` - The webhook secret shared with GitHub
/// * `payload` - The raw request body, exactly as received
/// * `signature` - The `X-Hub-Signature-256` header value (empty if absent)
///
/// # Returns
///
/// `true` if the header equals `sha256=` followed by the lowercase hex
/// digest, `false` otherwise.
pub fn verify_github_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    if signature.is_empty() {
        warn!(payload_length = payload.len(), "github_signature_missing");
        return false;
    }

    let expected = match sign_payload(secret, payload) {
        Some(s) => s,
        None => {
            warn!("github_signature_invalid_key");
            return false;
        }
    };

    let valid = constant_time_compare(&expected, signature);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = signature.len(),
            has_prefix = signature.starts_with(SIGNATURE_PREFIX),
            "github_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"action":"opened","pull_request":{"url":"https://api.example/pr/1"}}"#;

    #[test]
    fn test_sign_payload_known_vector() {
        // Example from GitHub's documentation.
        let signature = sign_payload("It's a Secret to Everybody", b"Hello, World!").unwrap();
        assert_eq!(
            signature,
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
        );
    }

    #[test]
    fn test_verify_signature_valid() {
        let signature = sign_payload("s3cr3t", BODY).unwrap();
        assert!(verify_github_signature("s3cr3t", BODY, &signature));
    }

    #[test]
    fn test_verify_signature_missing() {
        assert!(!verify_github_signature("s3cr3t", BODY, ""));
    }

    #[test]
    fn test_verify_signature_wrong_secret() {
        let signature = sign_payload("other", BODY).unwrap();
        assert!(!verify_github_signature("s3cr3t", BODY, &signature));
    }

    #[test]
    fn test_verify_signature_arbitrary_string() {
        assert!(!verify_github_signature("s3cr3t", BODY, "not-a-signature"));
    }

    #[test]
    fn test_verify_signature_requires_prefix() {
        let signature = sign_payload("s3cr3t", BODY).unwrap();
        let bare = signature.trim_start_matches(SIGNATURE_PREFIX);
        assert!(!verify_github_signature("s3cr3t", BODY, bare));
    }

    #[test]
    fn test_verify_signature_is_case_sensitive() {
        let signature = sign_payload("s3cr3t", BODY).unwrap();
        let upper = format!(
            "{}{}",
            SIGNATURE_PREFIX,
            signature[SIGNATURE_PREFIX.len()..].to_uppercase()
        );
        assert!(!verify_github_signature("s3cr3t", BODY, &upper));
    }

    #[test]
    fn test_verify_signature_uses_raw_bytes() {
        // Same JSON value, different whitespace: GitHub signed the bytes it sent.
        let signature = sign_payload("s3cr3t", BODY).unwrap();
        let reformatted =
            br#"{ "action": "opened", "pull_request": { "url": "https://api.example/pr/1" } }"#;
        assert!(!verify_github_signature("s3cr3t", reformatted, &signature));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
