//! # Retry/Backoff Controller
//!
//! Wraps a zero-argument fetch operation and re-invokes it while it fails
//! with a retryable error (HTTP 429 or 5xx).
//!
//! ## Policy:
//! - `max_attempts` counts the first try.
//! - The delay before attempt `n` (n >= 2) is
//!   `min(max_delay, 2^n * base_delay + jitter)`, with the jitter drawn
//!   uniformly from `0..max_jitter`.
//! - Non-retryable errors return immediately; after the last attempt the
//!   final error is returned unchanged.
//!
//! Waiting uses `tokio::time::sleep`, so a request in backoff yields its task
//! without blocking other requests handled by the runtime.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::error::FetchError;

/// Bounds and shape of the retry schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Never less than 1.
    pub max_attempts: u32,
    /// Multiplier unit of the exponential term.
    pub base_delay: Duration,
    /// Upper bound applied after the jitter is added.
    pub max_delay: Duration,
    /// Upper bound (exclusive) of the random jitter.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(30_000),
            max_jitter: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Default schedule with a custom attempt budget (clamped to at least 1).
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Delay to wait before `attempt` (1-based) given a jitter sample.
    pub fn delay_for_attempt(&self, attempt: u32, jitter: Duration) -> Duration {
        let exponential = 2u128
            .saturating_pow(attempt)
            .saturating_mul(self.base_delay.as_millis());
        let total = exponential.saturating_add(jitter.as_millis());
        let capped = total.min(self.max_delay.as_millis());
        Duration::from_millis(u64::try_from(capped).unwrap_or(u64::MAX))
    }

    fn sample_jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::random_range(0..max_ms))
    }
}

/// Runs `operation` under `policy`.
///
/// # Errors
/// Returns the first non-retryable error, or the last error once the
/// attempt budget is spent.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "fetch succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                attempt += 1;
                let delay = policy.delay_for_attempt(attempt, policy.sample_jitter());
                warn!(
                    attempt,
                    max_attempts,
                    status = err.status(),
                    delay_ms = delay.as_millis() as u64,
                    "retryable upstream failure, backing off"
                );
                sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn upstream(status: u16) -> FetchError {
        FetchError::Upstream {
            status,
            body: format!("status {}", status),
        }
    }

    #[test]
    fn delay_grows_exponentially_from_the_second_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_attempt(2, Duration::ZERO), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3, Duration::ZERO), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(4, Duration::ZERO), Duration::from_secs(16));
    }

    #[test]
    fn delay_includes_jitter_and_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.delay_for_attempt(2, Duration::from_millis(250)),
            Duration::from_millis(4250)
        );
        assert_eq!(policy.delay_for_attempt(5, Duration::ZERO), Duration::from_secs(30));
        assert_eq!(policy.delay_for_attempt(64, Duration::from_millis(500)), Duration::from_secs(30));
    }

    #[test]
    fn attempt_budget_is_never_zero() {
        assert_eq!(RetryPolicy::with_max_attempts(0).max_attempts, 1);
        assert_eq!(RetryPolicy::with_max_attempts(7).max_attempts, 7);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let policy = RetryPolicy::default();
        for _ in 0..200 {
            assert!(policy.sample_jitter() < Duration::from_millis(500));
        }
    }

    #[test]
    fn jitter_upper_bound_is_exclusive() {
        let policy = RetryPolicy {
            max_jitter: Duration::from_millis(1),
            ..RetryPolicy::default()
        };
        for _ in 0..50 {
            assert_eq!(policy.sample_jitter(), Duration::ZERO);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_three_rate_limits() {
        let policy = RetryPolicy::default();
        let attempts = Arc::new(AtomicU32::new(0));
        let started_at = Arc::new(Mutex::new(Vec::new()));
        let origin = Instant::now();

        let result = retry_with_backoff(&policy, || {
            let attempts = Arc::clone(&attempts);
            let started_at = Arc::clone(&started_at);
            async move {
                started_at.lock().unwrap().push(origin.elapsed());
                if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(upstream(429))
                } else {
                    Ok("payload")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "payload");
        assert_eq!(attempts.load(Ordering::SeqCst), 4);

        let started_at = started_at.lock().unwrap();
        let gaps: Vec<Duration> = started_at.windows(2).map(|w| w[1] - w[0]).collect();
        assert_eq!(gaps.len(), 3);
        for (gap, floor) in gaps.iter().zip([4u64, 8, 16]) {
            assert!(*gap >= Duration::from_secs(floor), "gap {:?} below {}s", gap, floor);
            assert!(*gap < Duration::from_millis(floor * 1000 + 500), "gap {:?} too long", gap);
            assert!(*gap <= Duration::from_secs(30));
        }
        assert!(gaps.windows(2).all(|w| w[1] > w[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn forbidden_is_not_retried() {
        let policy = RetryPolicy::default();
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(upstream(403)) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Upstream { status: 403, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn network_errors_are_not_retried() {
        let policy = RetryPolicy::default();
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(FetchError::Network("connection reset".into())) }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Network(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_surfaces_the_last_error() {
        let policy = RetryPolicy::with_max_attempts(3);
        let attempts = AtomicU32::new(0);

        let result: Result<(), _> = retry_with_backoff(&policy, || {
            let n = attempts.fetch_add(1, Ordering::SeqCst);
            let status = if n < 2 { 503 } else { 502 };
            async move { Err(upstream(status)) }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        match result {
            Err(FetchError::Upstream { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "status 502");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_budget_never_sleeps() {
        let policy = RetryPolicy::with_max_attempts(1);
        let origin = Instant::now();

        let result: Result<(), _> = retry_with_backoff(&policy, || async { Err(upstream(500)) }).await;

        assert!(result.is_err());
        assert_eq!(origin.elapsed(), Duration::ZERO);
    }
}
