//! Crash-isolated task fan-out.
//!
//! Three launch modes built on one isolation boundary:
//! - [`spawn`] fires a background unit and never blocks the caller;
//! - [`run_all`] starts every unit at once and waits for all of them;
//! - [`run_bounded`] does the same behind a fixed-size concurrency token pool.
//!
//! A panic inside any unit is caught at that unit's boundary, logged once
//! (payload plus a bounded backtrace snapshot), and converted into the
//! [`StrandError::Panic`] sentinel. It never takes down sibling units or the
//! caller. The waiting modes return the first failure observed in completion
//! order; all remaining units still run to completion.

use std::any::Any;
use std::backtrace::Backtrace;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::error;

use crate::errors::{Result, StrandError};

/// Upper bound on the backtrace snapshot written to the panic log record.
const PANIC_TRACE_BYTES: usize = 1024;

/// Launch one fire-and-forget unit on the runtime.
///
/// Returns immediately; the caller has no handle to observe completion. A
/// panic inside the unit is logged and swallowed. Intended for self-contained
/// background loops such as a config watch loop.
///
/// Must be called from within a tokio runtime.
pub fn spawn<F>(unit: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(payload) = AssertUnwindSafe(unit).catch_unwind().await {
            log_panic(payload.as_ref());
        }
    });
}

/// Run every unit concurrently and wait for all of them.
///
/// Returns the first failure observed in completion order, or `Ok(())` when
/// every unit succeeds. A panicking unit contributes the
/// [`StrandError::Panic`] sentinel and does not stop its siblings.
pub async fn run_all<I, F>(units: I) -> Result<()>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<()>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for unit in units {
        set.spawn(isolated(unit));
    }
    drain(set).await
}

/// Run units with at most `max_concurrency` executing simultaneously.
///
/// Units are submitted in input order; submission blocks on a free
/// concurrency token, so backpressure applies before a unit starts. The token
/// is released on every exit path, including panic. Aggregation matches
/// [`run_all`].
///
/// `max_concurrency == 0` is rejected with a configuration error rather than
/// deadlocking on the first submission.
pub async fn run_bounded<I, F>(max_concurrency: usize, units: I) -> Result<()>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<()>> + Send + 'static,
{
    if max_concurrency == 0 {
        return Err(StrandError::configuration(
            "max_concurrency must be at least 1",
        ));
    }
    let permits = Arc::new(Semaphore::new(max_concurrency));
    let mut set = JoinSet::new();
    for unit in units {
        // Blocks the submission path until a token frees up. The semaphore is
        // never closed, so acquire_owned only fails if that invariant breaks.
        let permit = permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| StrandError::internal("concurrency token pool closed"))?;
        set.spawn(async move {
            let _permit = permit;
            isolated(unit).await
        });
    }
    drain(set).await
}

/// Run one unit behind the panic-isolation boundary.
async fn isolated<F>(unit: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match AssertUnwindSafe(unit).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            log_panic(payload.as_ref());
            Err(StrandError::Panic)
        }
    }
}

/// Wait for every spawned unit and keep the first observed failure.
///
/// Only this collector sees completions, so the first-failure selection is
/// race-free and happens exactly once per call.
async fn drain(mut set: JoinSet<Result<()>>) -> Result<()> {
    let mut first_failure: Option<StrandError> = None;
    while let Some(joined) = set.join_next().await {
        let outcome = match joined {
            Ok(outcome) => outcome,
            // A panic that escaped the unit boundary, e.g. raised while
            // unwinding in a destructor.
            Err(join_err) if join_err.is_panic() => {
                log_panic(join_err.into_panic().as_ref());
                Err(StrandError::Panic)
            }
            Err(join_err) => Err(StrandError::internal(format!(
                "task join failed: {join_err}"
            ))),
        };
        if let Err(failure) = outcome {
            if first_failure.is_none() {
                first_failure = Some(failure);
            }
        }
    }
    match first_failure {
        Some(failure) => Err(failure),
        None => Ok(()),
    }
}

/// Emit the single diagnostic record for a captured panic.
fn log_panic(payload: &(dyn Any + Send)) {
    let trace = Backtrace::force_capture().to_string();
    let mut end = PANIC_TRACE_BYTES.min(trace.len());
    while !trace.is_char_boundary(end) {
        end -= 1;
    }
    error!(
        panic = %panic_message(payload),
        backtrace = %&trace[..end],
        "panic captured in task handler"
    );
}

/// Render a panic payload to text. Payloads from `panic!` are `&str` or
/// `String`; anything else gets a placeholder.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
