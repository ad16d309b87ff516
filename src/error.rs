use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Error types for reference matching operations
#[derive(Error, Debug)]
pub enum MatcherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic API error with HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// API rate limit exceeded
    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    /// No references could be segmented from the input text
    ///
    /// Returned for blank or whitespace-only input. Distinct from a run where
    /// references were found but none matched.
    #[error("no references found in input text")]
    NoReferencesFound,
}

pub type Result<T> = result::Result<T, MatcherError>;

impl RetryableError for MatcherError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            MatcherError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                // Server errors (5xx) and rate limiting (429) are retryable
                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                // DNS and other network errors
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            // Rate limiting should be retried after delay
            MatcherError::RateLimitExceeded => true,

            MatcherError::ApiError { status, message } => {
                (*status >= 500 && *status < 600) || *status == 429 || {
                    let lower_msg = message.to_lowercase();
                    lower_msg.contains("temporarily unavailable")
                        || lower_msg.contains("timeout")
                        || lower_msg.contains("connection")
                }
            }

            // Malformed responses and empty input are not transient
            MatcherError::JsonError(_) | MatcherError::NoReferencesFound => false,
        }
    }

    fn retry_reason(&self) -> &str {
        if self.is_retryable() {
            match self {
                MatcherError::RequestError(err) if err.is_timeout() => "Request timeout",
                MatcherError::RequestError(err) if err.is_connect() => "Connection error",
                MatcherError::RequestError(_) => "Network error",
                MatcherError::RateLimitExceeded => "Rate limit exceeded",
                MatcherError::ApiError { status, .. } => match status {
                    429 => "Rate limit exceeded",
                    500..=599 => "Server error",
                    _ => "Temporary API error",
                },
                _ => "Transient error",
            }
        } else {
            match self {
                MatcherError::JsonError(_) => "Invalid JSON response",
                MatcherError::NoReferencesFound => "Empty input",
                _ => "Non-transient error",
            }
        }
    }
}
