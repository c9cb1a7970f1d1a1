//! Retry with exponential backoff for transient service errors.

use std::future::Future;
use std::time::Duration;
use storyloom_error::{RetryableError, ServiceError};
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{info, warn};

/// Overrides for the per-error retry strategy.
///
/// By default each retryable error picks its own backoff (see
/// [`RetryableError::retry_strategy_params`]); these settings can disable
/// retries or replace the backoff and attempt count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct RetrySettings {
    /// Fail on the first error
    no_retry: bool,
    /// Replaces the error-specific retry count
    max_retries: Option<usize>,
    /// Replaces the error-specific initial backoff
    backoff_ms: Option<u64>,
}

impl RetrySettings {
    /// Error-specific strategy with optional overrides.
    pub fn new(max_retries: Option<usize>, backoff_ms: Option<u64>) -> Self {
        Self {
            no_retry: false,
            max_retries,
            backoff_ms,
        }
    }

    /// Never retry.
    pub fn disabled() -> Self {
        Self {
            no_retry: true,
            ..Self::default()
        }
    }
}

/// Runs `attempt`, retrying while it fails with a retryable error.
///
/// The first failure decides the strategy: permanent errors return at once,
/// transient ones are retried with the backoff their kind calls for. At most
/// `1 + max_retries` attempts are made and every retry waits its backoff.
pub(crate) async fn with_retry<T, F, Fut>(
    settings: &RetrySettings,
    operation: &str,
    mut attempt: F,
) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let first_error = match attempt().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if settings.no_retry || !first_error.is_retryable() {
        warn!(operation, error = %first_error, "Request failed, not retrying");
        return Err(first_error);
    }

    let (mut initial_ms, mut max_retries, max_delay_secs) = first_error.retry_strategy_params();
    if let Some(backoff) = settings.backoff_ms {
        initial_ms = backoff;
    }
    if let Some(retries) = settings.max_retries {
        max_retries = retries;
    }

    info!(
        operation,
        error = %first_error,
        initial_backoff_ms = initial_ms,
        max_retries,
        max_delay_secs,
        "Request failed, will retry"
    );

    let mut strategy = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(max_retries);

    // Retry::spawn attempts immediately, so the first backoff is slept here.
    match strategy.next() {
        Some(delay) => tokio::time::sleep(delay).await,
        None => return Err(first_error),
    }

    Retry::spawn(strategy, || {
        let next = attempt();
        async move {
            match next.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Retryable error");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent error, giving up");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
