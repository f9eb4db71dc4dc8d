//! HTTP request handlers for the QuoteDesk gateway.
//!
//! Every handler follows the same template: pull the bearer token,
//! shape the upstream query, forward, wrap the result in the uniform
//! envelope. Upstream failures propagate with their own status and
//! message.

pub mod catalog;
pub mod contracts;
pub mod quotes;

use axum::http::HeaderMap;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Optional idempotency key supplied by the dashboard; forwarded
/// upstream verbatim so a duplicate submission can be recognized.
pub(crate) fn idempotency_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
