//! Log Redaction Layer
//!
//! Scrubs API keys, bearer tokens, and inline image data URLs from strings
//! prior to logging. Image data URLs are both huge and identifying, so they
//! never belong in a log line.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-_]{16,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static DATA_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:image/[a-z+\-]+;base64,[A-Za-z0-9+/=]+").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    DATA_URL_RE.replace_all(&redacted, "[IMAGE_DATA]").to_string()
}
