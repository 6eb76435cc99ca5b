//! Bounded-retry policy around the page fetcher.
//!
//! Transient fetch failures (timeouts, navigation errors, a results
//! container that never rendered) are retried with exponential backoff
//! before a job is allowed to fail. Browser launch failures are
//! environmental and are propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
///
/// Retriable errors:
/// - [`FetchError::Timeout`] — the page may load on a later attempt.
/// - [`FetchError::NavigationFailed`] — network-level flakiness.
/// - [`FetchError::SelectorNotFound`] — the target site renders results
///   asynchronously; a fresh session may succeed.
/// - [`FetchError::Browser`] — CDP transport hiccup.
///
/// Non-retriable:
/// - [`FetchError::Launch`] — the browser binary/config is broken; retrying
///   reproduces the same failure.
fn is_retriable(err: &FetchError) -> bool {
    !matches!(err, FetchError::Launch { .. })
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On a retriable error the function sleeps `backoff_base_secs * 2^attempt`
/// seconds and tries again, up to `max_retries` additional attempts after
/// the first try. If all retries are exhausted the last error is returned.
/// Non-retriable errors return immediately without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, capped so extreme
        // configs cannot overflow.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
