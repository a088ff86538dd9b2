//! Shared HTTP response checks for the remote stage.
//!
//! 429 becomes [`ClassifyError::RateLimited`] (with `Retry-After` parsing),
//! any other non-success becomes [`ClassifyError::Api`].

use crate::error::ClassifyError;

/// Check an HTTP response for error statuses; returns it unchanged on success.
///
/// # Errors
///
/// Returns [`ClassifyError::RateLimited`] for 429 and [`ClassifyError::Api`]
/// for any other non-success status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClassifyError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClassifyError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(ClassifyError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 1 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(1)
}
