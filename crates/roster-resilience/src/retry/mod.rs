//! Retry policy implementation.

mod outcome;

pub use outcome::{classify, Outcome, StatusClass};

use roster_core::{RosterError, RosterResult};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Retry policy configuration.
///
/// The delay before retry `n` (1-indexed) is
/// `initial_delay * multiplier^(n - 1)`, capped at `max_delay`. With the
/// defaults that is 2s, 4s, 8s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
            multiplier: 2,
        }
    }
}

/// Per-request bookkeeping, discarded once the request reaches a terminal outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryContext {
    /// Retries performed so far.
    pub attempt_count: u32,
    /// Delay slept before the latest retry.
    pub last_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new retry policy with the specified number of retries.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Calculates the delay before the given retry (1-indexed).
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }

        let factor = self.multiplier.saturating_pow(retry - 1);
        self.initial_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Runs `operation` until it succeeds, fails permanently, or the retry budget is spent.
    ///
    /// Each attempt and each backoff sleep is raced against `cancel`; a
    /// cancellation surfaces as [`RosterError::Cancelled`]. Once the last
    /// retry is still [`Outcome::Retryable`] the policy fails with
    /// [`RosterError::RetryExhausted`] naming `endpoint`.
    pub async fn execute<F, Fut, T>(
        &self,
        endpoint: &str,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> RosterResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        let mut context = RetryContext::default();

        loop {
            if cancel.is_cancelled() {
                return Err(RosterError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RosterError::Cancelled),
                outcome = operation() => outcome,
            };

            let reason = match outcome {
                Outcome::Success(value) => return Ok(value),
                Outcome::Permanent(error) => return Err(error),
                Outcome::Retryable(reason) => reason,
            };

            if context.attempt_count >= self.max_retries {
                warn!(
                    "Giving up on {} after {} retries: {}",
                    endpoint, self.max_retries, reason
                );
                return Err(RosterError::RetryExhausted {
                    endpoint: endpoint.to_string(),
                    retries: self.max_retries,
                });
            }

            context.attempt_count += 1;
            context.last_delay = self.delay_for_retry(context.attempt_count);
            debug!(
                "Retry attempt {} for {} after {:?} ({})",
                context.attempt_count, endpoint, context.last_delay, reason
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RosterError::Cancelled),
                () = tokio::time::sleep(context.last_delay) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn transient<T>() -> Outcome<T> {
        Outcome::Retryable("status 503".to_string())
    }

    #[tokio::test]
    async fn test_retry_success() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let result = policy
            .execute("e", &cancel, || async { Outcome::Success(42) })
            .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_eventual_success() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = policy
            .execute("e", &cancel, || {
                let attempts = attempts_clone.clone();
                async move {
                    if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                        transient()
                    } else {
                        Outcome::Success(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_after_three_retries_with_2_4_8_backoff() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let started = Instant::now();

        let result: RosterResult<()> = policy
            .execute("https://api.example.com/users?page=1", &cancel, || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    transient()
                }
            })
            .await;

        let elapsed = started.elapsed();
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
        assert!(elapsed >= Duration::from_secs(14), "slept {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(15), "slept {:?}", elapsed);

        match result {
            Err(RosterError::RetryExhausted { endpoint, retries }) => {
                assert_eq!(endpoint, "https://api.example.com/users?page=1");
                assert_eq!(retries, 3);
            }
            other => panic!("expected RetryExhausted, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_is_not_retried() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let started = Instant::now();

        let result: RosterResult<()> = policy
            .execute("e", &cancel, || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Outcome::Permanent(RosterError::NotFound { url: "e".to_string() })
                }
            })
            .await;

        assert!(matches!(result, Err(RosterError::NotFound { .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff_returns_cancelled() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            canceller.cancel();
        });

        let started = Instant::now();
        let result: RosterResult<()> = policy
            .execute("e", &cancel, || {
                let attempts = attempts_clone.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    transient()
                }
            })
            .await;

        assert!(matches!(result, Err(RosterError::Cancelled)));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_cancel_during_attempt_returns_cancelled() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        let canceller = cancel.clone();

        let result: RosterResult<()> = policy
            .execute("e", &cancel, || {
                let canceller = canceller.clone();
                async move {
                    canceller.cancel();
                    std::future::pending::<Outcome<()>>().await
                }
            })
            .await;

        assert!(matches!(result, Err(RosterError::Cancelled)));
    }

    #[tokio::test]
    async fn test_already_cancelled_skips_operation() {
        let policy = RetryPolicy::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let attempts = AtomicU32::new(0);

        let result: RosterResult<()> = policy
            .execute("e", &cancel, || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Outcome::Success(()) }
            })
            .await;

        assert!(matches!(result, Err(RosterError::Cancelled)));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_retries_fails_on_first_transient() {
        let policy = RetryPolicy::with_max_retries(0);
        let cancel = CancellationToken::new();
        let result: RosterResult<()> = policy.execute("e", &cancel, || async { transient() }).await;
        assert!(matches!(result, Err(RosterError::RetryExhausted { retries: 0, .. })));
    }

    #[test]
    fn test_delay_for_retry_zero() {
        assert_eq!(RetryPolicy::default().delay_for_retry(0), Duration::ZERO);
    }

    #[test]
    fn test_delay_for_retry_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_retry(3), Duration::from_secs(8));
    }

    #[test]
    fn test_delay_capped_at_max() {
        let policy = RetryPolicy {
            max_delay: Duration::from_secs(5),
            ..Default::default()
        };
        assert_eq!(policy.delay_for_retry(10), Duration::from_secs(5));
        assert_eq!(policy.delay_for_retry(40), Duration::from_secs(5));
    }

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.multiplier, 2);
    }
}
