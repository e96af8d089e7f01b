//! Fixed-capacity worker pool.
//!
//! The pool is constructed explicitly, sized once, and passed into the
//! driver; there is no hidden global executor state. Its capacity is meant to
//! sit *above* the external resource pool's capacity so the driver is never
//! the bottleneck: contention must show up in the resource pool, not here.

use poolprobe_core::HarnessError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Default execution capacity, above the usual database pool sizes the
/// harness is pointed at.
pub const DEFAULT_CAPACITY: usize = 50;

/// A bounded set of execution slots for concurrent operations.
///
/// Waiters queue in FIFO order for a free slot. Cloning is cheap and shares
/// the underlying capacity.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl WorkerPool {
    /// Creates a pool with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a pool that can run nothing is a
    /// configuration bug, caught at process start.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "worker pool capacity must be at least 1");
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// The configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Slots currently occupied.
    pub fn in_use(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }

    /// Acquires one slot, waiting in FIFO order if the pool is saturated.
    ///
    /// Fails with [`HarnessError::Interrupted`] if the pool is shut down
    /// while waiting.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, HarnessError> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| HarnessError::Interrupted)
    }

    /// Shuts the pool down: pending and future acquisitions fail.
    ///
    /// Tied to process shutdown; in-flight operations keep their slots until
    /// they finish.
    pub fn close(&self) {
        self.semaphore.close();
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("capacity", &self.capacity)
            .field("available", &self.available())
            .finish()
    }
}
