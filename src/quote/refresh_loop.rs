//! Debounced "latest request supersedes" driver.
//!
//! Interactive callers request a new quote on every keystroke. Rather than
//! cancelling work, [`RefreshLoop`] coalesces requests: the first requester
//! becomes the driver and keeps re-running the job until a full
//! debounce-then-run cycle completes with no newer request. Results of
//! superseded runs are dropped.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::trace;

/// Coalesces bursts of refresh requests into as few job runs as possible.
#[derive(Debug)]
pub struct RefreshLoop {
    debounce: Duration,
    should_refresh: AtomicBool,
    running: AtomicBool,
}

impl RefreshLoop {
    /// Creates an idle loop that waits `debounce` before each run.
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            should_refresh: AtomicBool::new(false),
            running: AtomicBool::new(false),
        }
    }

    /// The delay before each run.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Returns `true` while a driver is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Records that inputs changed.
    ///
    /// Returns `true` if the caller became the driver and must call
    /// [`drive`](Self::drive). Otherwise the active driver will pick the
    /// request up.
    pub fn request(&self) -> bool {
        self.should_refresh.store(true, Ordering::SeqCst);
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Runs `job` until a run completes with no newer request and returns
    /// that run's result.
    ///
    /// Each cycle clears the request flag, sleeps for the debounce delay and
    /// runs the job. A request arriving during the sleep or the run starts
    /// another cycle and the pending result is discarded.
    ///
    /// Returns `None` only if called without a pending request.
    pub async fn drive<F, Fut, T>(&self, mut job: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = T>,
    {
        let mut latest = None;
        loop {
            while self.should_refresh.swap(false, Ordering::SeqCst) {
                tokio::time::sleep(self.debounce).await;
                if self.should_refresh.load(Ordering::SeqCst) {
                    trace!("refresh superseded during debounce");
                    continue;
                }
                let result = job().await;
                if self.should_refresh.load(Ordering::SeqCst) {
                    trace!("refresh superseded during run");
                    continue;
                }
                latest = Some(result);
            }
            self.running.store(false, Ordering::SeqCst);
            // A request may have landed between the last check and the
            // store above; reclaim the driver role if nobody else did.
            if !self.should_refresh.load(Ordering::SeqCst)
                || self
                    .running
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
            {
                break;
            }
        }
        latest
    }
}
