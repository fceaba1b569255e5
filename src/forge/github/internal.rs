//! Internal implementation for the GitHub client.
//!
//! Contains request plumbing and response decoding.
//! Not exposed in public interface.

use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::RemoteError;
use crate::forge::Credentials;

pub(super) const GITHUB_ACCEPT: &str = "application/vnd.github+json";

// ============================================================================
// REST JSON types (internal, match API response format)
// ============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct ForkResponse {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

// ============================================================================
// Request helpers
// ============================================================================

/// Attach auth and headers, send, and turn non-2xx answers into `RemoteError`.
pub(super) fn send(
    request: RequestBuilder,
    credentials: &Credentials,
    what: &str,
) -> Result<Response, RemoteError> {
    let response = request
        .basic_auth(&credentials.username, Some(credentials.token()))
        .header(ACCEPT, GITHUB_ACCEPT)
        .send()
        .map_err(|e| network_error(what, &e))?;

    let status = response.status();
    log::debug!("{} -> {}", what, status);

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    Err(error_from_body(status, &body))
}

/// Prefer the service's own `message`; fall back to the status line.
pub(super) fn error_from_body(status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => RemoteError::new(message),
        None => RemoteError::new(format!(
            "{} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )),
    }
}

pub(super) fn network_error(what: &str, err: &reqwest::Error) -> RemoteError {
    RemoteError::new(format!("Network error during {}: {}", what, err))
}
