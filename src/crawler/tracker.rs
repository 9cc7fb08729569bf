//! Outstanding-work counter for the recursive crawl
//!
//! Every unit of work is registered with [`WorkTracker::start`] before it is
//! spawned and unregistered when its [`WorkGuard`] drops. The crawl is over
//! exactly when the counter returns to zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct TrackerInner {
    outstanding: AtomicUsize,
    idle: Notify,
}

/// Counts in-flight units of work and wakes waiters when none remain
#[derive(Debug, Clone, Default)]
pub struct WorkTracker {
    inner: Arc<TrackerInner>,
}

/// Registration of one unit of work
///
/// Dropping the guard, on any path, marks the unit finished.
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the work as finished"]
pub struct WorkGuard {
    inner: Arc<TrackerInner>,
}

impl WorkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unit of work; call before spawning it
    pub fn start(&self) -> WorkGuard {
        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of units started but not yet finished
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Waits until the outstanding count is zero
    ///
    /// Returns immediately if nothing is outstanding.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register interest before checking, so a drop to zero between
            // the check and the await is not missed.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.inner.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}
