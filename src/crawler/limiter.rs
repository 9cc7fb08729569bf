//! Global concurrency limiter
//!
//! A counting admission gate in front of every fetch. Slots are handed out as
//! RAII permits, so a slot goes back on every exit path of the holder,
//! including early returns, failed fetches and panics.

use crate::CrawlError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps the number of simultaneously admitted units of work
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One admitted slot; dropping it releases the slot
#[derive(Debug)]
pub struct LimiterPermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// Creates a limiter admitting at most `capacity` holders
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until fewer than `capacity` holders are admitted, then admits the caller
    pub async fn acquire(&self) -> Result<LimiterPermit, CrawlError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| CrawlError::LimiterClosed)?;

        Ok(LimiterPermit { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
