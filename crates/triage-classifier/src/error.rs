//! Classifier error types.
//!
//! None of these reach the user: the fallback chain logs them and answers
//! from the keyword stage instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No credential configured for the remote stage.
    #[error("remote classifier is not configured")]
    NotConfigured,

    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model answered with something other than a priority label.
    #[error("unexpected label: '{0}'")]
    UnexpectedLabel(String),
}

impl ClassifyError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures, 5xx and 429 are transient. A bad body or an
    /// off-script answer will not change on retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            Self::RateLimited { .. } => true,
            Self::NotConfigured | Self::Parse(_) | Self::UnexpectedLabel(_) => false,
        }
    }
}
