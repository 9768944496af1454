//! Bounded retry with exponential backoff
//!
//! Attempt `n` (counting from 1) that fails with a retryable error sleeps
//! `base_delay * 2^(n-1)` before attempt `n+1`. Non-retryable errors and the
//! error from the final attempt are returned as-is.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{error, warn};

use crate::error::CrmError;

/// Errors that know whether another attempt could succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for CrmError {
    fn is_retryable(&self) -> bool {
        CrmError::is_retryable(self)
    }
}

/// Attempt budget and backoff base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Attempt budget, never below one
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay slept after failed attempt `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }
}

/// Runs `operation` until it succeeds, fails permanently, or the budget is spent
///
/// After failed attempt `n` the call sleeps [`RetryPolicy::delay_after`]`(n)`.
/// Errors whose [`Retryable::is_retryable`] is false are returned at once.
///
/// # Errors
///
/// Returns the error of the last attempt.
///
/// # Example
///
/// ```rust,ignore
/// let policy = RetryPolicy::new(3, Duration::from_secs(1));
/// let contact = with_retry(&policy, "contact search", || crm.find_contact_by_email(email)).await?;
/// ```
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + fmt::Display,
{
    let max_attempts = policy.effective_attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt >= max_attempts => {
                error!(operation = label, attempts = max_attempts, error = %err, "CRM operation failed after all attempts");
                return Err(err);
            }
            Err(err) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    operation = label,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "CRM operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
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

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_zero_attempts_clamps_to_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).effective_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_conflict_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), CrmError> = with_retry(&RetryPolicy::default(), "test", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CrmError::from_status(409, "Contact already exists"))
            }
        })
        .await;

        assert!(matches!(result, Err(CrmError::Conflict { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_request_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), CrmError> = with_retry(&RetryPolicy::default(), "test", move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(CrmError::from_status(400, "Property values were not valid"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_with_backoff() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result = with_retry(&RetryPolicy::default(), "test", move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(CrmError::from_status(503, "unavailable"))
                } else {
                    Ok("contact-1")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "contact-1");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();

        let result: Result<(), CrmError> = with_retry(&RetryPolicy::default(), "test", move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Err(CrmError::Server {
                    status: 500,
                    message: format!("failure {}", n),
                })
            }
        })
        .await;

        assert_eq!(
            result.unwrap_err(),
            CrmError::Server {
                status: 500,
                message: "failure 3".into()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), CrmError> =
            with_retry(&RetryPolicy::new(0, Duration::from_secs(1)), "test", move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(CrmError::Transport("connection reset".into()))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
