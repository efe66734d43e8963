//! Bounded retry loops with a caller-supplied pacing interval.
//!
//! A retry is a layer over a unit of work, applied before the unit is handed
//! to the fan-out core; the core itself never retries.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::debug;

use crate::errors::{Result, StrandError};

/// Inter-attempt delay used when the caller has no preference.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(200);

/// Run `op` up to `attempts` times, sleeping `interval` between attempts.
///
/// Every error is considered retryable; the last error is returned once the
/// attempt budget is spent. `attempts` is clamped to at least one so the
/// operation always runs.
pub async fn retry<F, Fut>(attempts: u32, interval: Duration, op: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    retry_if(attempts, interval, |_| true, op).await
}

/// Like [`retry`], but `should_retry` decides whether a given error is worth
/// another attempt. A non-retryable error is returned immediately.
pub async fn retry_if<F, Fut, P>(
    attempts: u32,
    interval: Duration,
    mut should_retry: P,
    mut op: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
    P: FnMut(&StrandError) -> bool,
{
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(()) => return Ok(()),
            Err(failure) => {
                if attempt >= attempts || !should_retry(&failure) {
                    return Err(failure);
                }
                debug!(attempt, error = %failure, "operation failed, retrying");
                sleep(interval).await;
            }
        }
    }
}
