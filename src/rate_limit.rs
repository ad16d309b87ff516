//! Token-paced scheduling of NCBI E-utilities calls
//!
//! NCBI enforces 3 requests/second without an API key and 10 requests/second
//! with one; violations can lead to IP blocking. The orchestrator acquires a
//! token before every external call, so the inter-call spacing (~0.34s at the
//! default rate) falls out of the bucket refill rate rather than inline sleeps.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

/// Token bucket rate limiter shared across clones
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
}

struct TokenBucket {
    tokens: f64,
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    fn try_take(&mut self) -> Option<Duration> {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            // Time until the deficit is refilled
            let deficit = 1.0 - self.tokens;
            Some(Duration::from_secs_f64(deficit / self.refill_rate))
        }
    }
}

impl RateLimiter {
    /// Create a limiter allowing `rate` calls per second
    pub fn new(rate: f64) -> Self {
        let capacity = rate.max(1.0);
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: rate,
                last_refill: Instant::now(),
            })),
        }
    }

    /// NCBI limit without an API key (3 requests/second)
    pub fn ncbi_default() -> Self {
        Self::new(3.0)
    }

    /// NCBI limit with an API key (10 requests/second)
    pub fn ncbi_with_key() -> Self {
        Self::new(10.0)
    }

    /// Acquire a token, sleeping as needed to respect the configured rate
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                bucket.try_take()
            };

            match wait {
                None => return,
                Some(duration) => {
                    debug!(wait_ms = duration.as_millis() as u64, "Pacing API call");
                    sleep(duration).await;
                }
            }
        }
    }

    /// Whether a token is available right now (does not consume one)
    pub async fn check_available(&self) -> bool {
        let mut bucket = self.bucket.lock().await;
        bucket.refill();
        bucket.tokens >= 1.0
    }

    /// Configured rate in calls per second
    pub async fn rate(&self) -> f64 {
        self.bucket.lock().await.refill_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_presets() {
        assert_eq!(RateLimiter::ncbi_default().rate().await, 3.0);
        assert_eq!(RateLimiter::ncbi_with_key().rate().await, 10.0);
    }

    #[tokio::test]
    async fn test_immediate_acquisition_up_to_capacity() {
        let limiter = RateLimiter::new(5.0);
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert!(!limiter.check_available().await);
    }

    #[tokio::test]
    async fn test_acquire_waits_when_exhausted() {
        let limiter = RateLimiter::new(4.0);
        for _ in 0..4 {
            limiter.acquire().await;
        }

        let start = Instant::now();
        limiter.acquire().await;
        // Fifth call must wait for a refill (250ms at 4/sec)
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_tokens_refill_over_time() {
        let limiter = RateLimiter::new(20.0);
        for _ in 0..20 {
            limiter.acquire().await;
        }
        assert!(!limiter.check_available().await);

        sleep(Duration::from_millis(100)).await;
        assert!(limiter.check_available().await);
    }

    #[tokio::test]
    async fn test_shared_across_clones() {
        let limiter = RateLimiter::new(6.0);
        let clone = limiter.clone();

        let a = tokio::spawn(async move {
            for _ in 0..3 {
                limiter.acquire().await;
            }
        });
        let b = tokio::spawn(async move {
            for _ in 0..3 {
                clone.acquire().await;
            }
        });

        assert!(a.await.is_ok());
        assert!(b.await.is_ok());
    }
}
