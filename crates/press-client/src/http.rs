//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 with `Retry-After` parsing, non-success
//! → [`ClientError::Api`]) so each client only supplies how to pull a message
//! out of its service's error body.

use reqwest::StatusCode;

use crate::error::ClientError;

/// Pulls a human-readable message out of an error body.
pub type MessageExtractor = fn(body: &str, status: StatusCode) -> String;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`ClientError::RateLimited`], `Retry-After`
///   seconds or 60 s when absent or unparseable.
/// - **Non-success status** → [`ClientError::Api`] with the extracted message.
pub async fn check_response(
    resp: reqwest::Response,
    extract: MessageExtractor,
) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: extract(&body, status),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Reason phrase for `status`, or its number when it has none.
pub fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_u16().to_string(), str::to_string)
}
