//! Fixed-delay retry for tourism API calls.
//!
//! The public data portal drops or throttles requests under load, so the
//! statistics queries retry a few times with a constant pause between
//! attempts before giving up.

use std::future::Future;
use std::time::Duration;

use crate::error::TourApiError;

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `3` means up to four attempts.
    pub max_retries: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Run `operation` until it succeeds, the error is not retryable, or the
/// retries are used up. The last error is returned.
///
/// `label` identifies the call in log output.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, TourApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TourApiError>>,
{
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() || attempt > policy.max_retries => {
                if attempt > 1 {
                    tracing::error!(
                        label,
                        attempts = attempt,
                        error = %e,
                        "Giving up after retries",
                    );
                }
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Attempt {attempt} failed, retrying",
                );
            }
        }

        tokio::time::sleep(policy.delay).await;
    }
}
