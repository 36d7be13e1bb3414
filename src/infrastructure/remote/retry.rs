use std::future::Future;
use std::time::Duration;

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use tracing::{debug, warn};

use super::errors::RemoteError;

/// Backoff schedule for requests to the remote service
///
/// Waits double from `initial` up to `max`, without jitter. Only transient
/// failures (429, 5xx, network) are retried, and at most `max_retries` times.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial: Duration,
    max: Duration,
}

impl RetryPolicy {
    /// `max_backoff_ms` is raised to `initial_backoff_ms` if it is smaller.
    pub fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial: Duration::from_millis(initial_backoff_ms),
            max: Duration::from_millis(max_backoff_ms.max(initial_backoff_ms)),
        }
    }

    fn schedule(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial)
            .with_max_interval(self.max)
            .with_multiplier(2.0)
            .with_randomization_factor(0.0)
            .with_max_elapsed_time(None)
            .build()
    }

    /// Run `operation` until it succeeds, fails permanently, or runs out of retries
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, RemoteError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RemoteError>>,
    {
        let mut attempts = 0_u32;

        backoff::future::retry_notify(
            self.schedule(),
            || {
                attempts += 1;
                let may_retry = attempts <= self.max_retries;
                let request = operation();
                async move { request.await.map_err(|err| classify(err, may_retry)) }
            },
            |err: RemoteError, wait: Duration| {
                warn!(error = %err, wait_ms = wait.as_millis(), "remote request failed, retrying");
            },
        )
        .await
        .inspect_err(|err| debug!(error = %err, "remote request gave up"))
    }
}

fn classify(err: RemoteError, may_retry: bool) -> backoff::Error<RemoteError> {
    if may_retry && err.is_transient() {
        backoff::Error::transient(err)
    } else {
        backoff::Error::permanent(err)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, 1000, 30_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoff::backoff::Backoff;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_schedule_doubles_up_to_max() {
        let policy = RetryPolicy::new(5, 1000, 10_000);
        let mut schedule = policy.schedule();

        let waits: Vec<u128> = (0..6)
            .map(|_| schedule.next_backoff().unwrap().as_millis())
            .collect();
        assert_eq!(waits, vec![1000, 2000, 4000, 8000, 10_000, 10_000]);
    }

    #[test]
    fn test_max_is_never_below_initial() {
        let policy = RetryPolicy::new(1, 500, 100);
        assert_eq!(policy.max, Duration::from_millis(500));
    }

    #[test]
    fn test_classify() {
        assert!(matches!(
            classify(RemoteError::RateLimited, true),
            backoff::Error::Transient { .. }
        ));
        assert!(matches!(
            classify(RemoteError::RateLimited, false),
            backoff::Error::Permanent(_)
        ));
        assert!(matches!(
            classify(RemoteError::NotFound, true),
            backoff::Error::Permanent(_)
        ));
    }

    #[tokio::test]
    async fn test_execute_retries_on_transient_error() {
        let policy = RetryPolicy::new(3, 1, 5);
        let calls = Arc::new(AtomicU32::new(0));

        let result = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(RemoteError::ServerError(
                            StatusCode::BAD_GATEWAY,
                            "busy".to_string(),
                        ))
                    } else {
                        Ok(7)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_execute_gives_up_on_permanent_error() {
        let policy = RetryPolicy::new(3, 1, 5);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), RemoteError> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(RemoteError::Forbidden("no".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(RemoteError::Forbidden(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_execute_stops_after_max_retries() {
        let policy = RetryPolicy::new(2, 1, 5);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), RemoteError> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(RemoteError::RateLimited)
                }
            })
            .await;

        assert!(matches!(result, Err(RemoteError::RateLimited)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_one_attempt() {
        let policy = RetryPolicy::new(0, 1, 5);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), RemoteError> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(RemoteError::RateLimited)
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
