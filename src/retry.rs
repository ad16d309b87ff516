//! Retry support for transient NCBI API failures

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;
use tracing::warn;

/// Classifies errors as transient (worth retrying) or permanent
pub trait RetryableError {
    /// Whether a retry could plausibly succeed
    fn is_retryable(&self) -> bool;

    /// Short human-readable reason, used in retry log messages
    fn retry_reason(&self) -> &str;
}

/// Retry policy for API requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: usize,
    /// Delay before the first retry; doubles on each subsequent retry
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// Disable retries entirely (single attempt)
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Run `operation`, retrying with jittered exponential backoff while the
/// returned error is retryable per [`RetryableError`].
pub async fn with_retry<T, E, F, Fut>(
    operation: F,
    config: &RetryConfig,
    context: &str,
) -> std::result::Result<T, E>
where
    E: RetryableError + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let base_ms = config.initial_delay.as_millis().max(2) as u64;
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(base_ms / 2)
        .max_delay(config.max_delay)
        .map(jitter)
        .take(config.max_retries);

    RetryIf::spawn(strategy, operation, |err: &E| {
        let retryable = err.is_retryable();
        if retryable {
            warn!(
                context = context,
                reason = err.retry_reason(),
                error = %err,
                "Retrying after transient error"
            );
        }
        retryable
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct TestError {
        retryable: bool,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "test error")
        }
    }

    impl RetryableError for TestError {
        fn is_retryable(&self) -> bool {
            self.retryable
        }

        fn retry_reason(&self) -> &str {
            "test"
        }
    }

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_millis(2),
            max_delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let attempts = AtomicUsize::new(0);
        let result: Result<u32, TestError> = with_retry(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            },
            &fast_config(),
            "test",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_transient_errors() {
        let attempts = AtomicUsize::new(0);
        let result: Result<u32, TestError> = with_retry(
            || async {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(TestError { retryable: true })
                } else {
                    Ok(7)
                }
            },
            &fast_config(),
            "test",
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_permanent_errors() {
        let attempts = AtomicUsize::new(0);
        let result: Result<u32, TestError> = with_retry(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(TestError { retryable: false })
            },
            &fast_config(),
            "test",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let attempts = AtomicUsize::new(0);
        let result: Result<u32, TestError> = with_retry(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(TestError { retryable: true })
            },
            &fast_config(),
            "test",
        )
        .await;

        assert!(result.is_err());
        // Initial attempt plus three retries
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }
}
