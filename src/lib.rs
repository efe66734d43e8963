// Core infrastructure modules
pub mod errors;

// Task orchestration core
pub mod fanout;
pub mod retry;
pub mod watch;

// Boundary helpers
pub mod convert;
pub mod http;
pub mod json;
pub mod net;
pub mod time;

// Re-exports for convenience
pub use errors::{Result, StrandError};
pub use fanout::{run_all, run_bounded, spawn};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // A flaky unit wrapped in a retry layer and handed to the fan-out core,
    // the composition the crate is built for.
    #[tokio::test]
    async fn test_retry_composes_with_fanout() {
        let calls = Arc::new(AtomicU32::new(0));
        let unit_calls = calls.clone();
        let unit = async move {
            retry::retry(3, Duration::from_millis(1), move || {
                let calls = unit_calls.clone();
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(StrandError::execution("flaky", "first attempt fails"))
                    } else {
                        Ok(())
                    }
                }
            })
            .await
        };

        run_all([unit]).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
