//! Error types for odds-provider operations.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching or decoding provider data.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unauthorized: invalid or missing API key")]
    Unauthorized,

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("API endpoint not found")]
    NotFound,

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("failed to parse response: {0}")]
    ParseError(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    #[error("provider {0} is not configured")]
    NotConfigured(&'static str),
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout(err.to_string())
        } else if err.is_decode() {
            FeedError::ParseError(err.to_string())
        } else {
            FeedError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

impl FeedError {
    /// Map a non-success HTTP status to a feed error.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => FeedError::Unauthorized,
            404 => FeedError::NotFound,
            429 => FeedError::RateLimitExceeded,
            _ => FeedError::Http {
                status,
                message: "unexpected status".to_string(),
            },
        }
    }

    /// Returns true if this error is transient and likely to succeed on
    /// the next poll tick.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FeedError::RequestFailed(_)
                | FeedError::Timeout(_)
                | FeedError::RateLimitExceeded
                | FeedError::Http { status: 500..=599, .. }
        )
    }

    /// Returns true if this error requires operator intervention and
    /// should not be retried automatically.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            FeedError::Unauthorized | FeedError::NotFound | FeedError::NotConfigured(_)
        )
    }

    /// Suggested delay before retrying, if a retry makes sense at all.
    pub fn suggested_retry_delay(&self) -> Option<Duration> {
        match self {
            FeedError::RateLimitExceeded => Some(Duration::from_secs(60)),
            FeedError::RequestFailed(_) => Some(Duration::from_secs(5)),
            FeedError::Timeout(_) => Some(Duration::from_secs(2)),
            FeedError::Http { status: 500..=599, .. } => Some(Duration::from_secs(5)),
            // Permanent or payload errors - no retry
            FeedError::Unauthorized
            | FeedError::NotFound
            | FeedError::Http { .. }
            | FeedError::ParseError(_)
            | FeedError::InvalidResponse(_)
            | FeedError::NotConfigured(_) => None,
        }
    }
}
