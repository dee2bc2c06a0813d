//! Retry policy and backoff delays

use std::time::Duration;

use async_trait::async_trait;

/// Statuses worth retrying: rate limiting and transient server errors
pub const RETRYABLE_STATUS_CODES: [u16; 4] = [429, 500, 502, 503];

/// Default predicate for retryable statuses
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// How failed requests are retried
///
/// `max_attempts` counts the first try. With the defaults a request is tried
/// three times, waiting 1s and then 2s between tries.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub multiplier: u32,
    pub retryable: fn(u16) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            multiplier: 2,
            retryable: is_retryable_status,
        }
    }
}

impl RetryPolicy {
    /// Delay before the given retry (0 = the wait after the first attempt)
    pub fn delay_for(&self, retry: u32) -> Duration {
        self.base_delay
            .saturating_mul(self.multiplier.saturating_pow(retry))
    }

    pub fn should_retry(&self, status: u16) -> bool {
        (self.retryable)(status)
    }
}

/// Waits between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
