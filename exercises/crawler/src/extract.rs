//! Candidate identifier extraction.
//!
//! Deliberately crude: payloads are whitespace-split and any token that
//! starts with an absolute-URL scheme is kept. Trailing punctuation and
//! markup survive, so downstream consumers must tolerate false positives.

pub fn candidate_urls(payload: &str) -> impl Iterator<Item = &str> {
    payload
        .split_whitespace()
        .filter(|token| token.starts_with("http://") || token.starts_with("https://"))
}
