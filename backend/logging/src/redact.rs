//! Log Redaction Layer
//!
//! Scrubs API keys, bearer tokens and phone numbers from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static TELEPHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]\d{3}[-.\s]\d{4}\b").ok()
});
static API_KEY_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").ok()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let mut redacted = input.to_string();

    // Keys first so the phone pattern never sees digits inside a token.
    if let Some(re) = API_KEY_RE.as_ref() {
        redacted = re.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned();
    }
    if let Some(re) = TELEPHONE_RE.as_ref() {
        redacted = re.replace_all(&redacted, "[REDACTED_PHONE]").into_owned();
    }

    redacted
}
