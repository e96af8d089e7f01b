//! The backing-store collaborator and an in-memory reference implementation.
//!
//! The harness never touches pool internals. Everything it needs from the
//! backing store goes through the [`Store`] trait: a bulk read, an explicit
//! slot-occupying hold, and an informational record count. The hold is
//! deliberately a separate operation rather than an artificially slow fetch,
//! so that query latency and connection dwell time stay distinguishable in
//! measurements.

use crate::HarnessError;
use futures::future::BoxFuture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A catalog record as returned by bulk fetches.
///
/// The harness only ever counts these; their content is test ballast.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Stable identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: f64,
}

/// Abstract interface to the backing store.
///
/// Implementations are expected to draw one pool slot per in-flight call and
/// release it when the returned future resolves *or is dropped*: dropping a
/// `hold` future mid-flight must release the slot.
pub trait Store: Send + Sync + 'static {
    /// Reads every record in the store.
    ///
    /// Fails with [`HarnessError::DataAccess`] when the store is unreachable
    /// or the read itself fails.
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Record>, HarnessError>>;

    /// Occupies one pool slot for `duration`.
    ///
    /// This is the server-side-sleep analog that makes pool contention
    /// observable; it performs no useful read.
    fn hold(&self, duration: Duration) -> BoxFuture<'static, Result<(), HarnessError>>;

    /// Number of records currently in the store.
    fn record_count(&self) -> BoxFuture<'static, Result<usize, HarnessError>>;
}

const DEFAULT_SEED_COUNT: usize = 50;

#[derive(Debug, Default)]
struct HoldTracker {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl HoldTracker {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Releases the tracked hold when dropped, on any exit path.
struct HoldGuard {
    inner: Arc<StoreInner>,
}

impl HoldGuard {
    fn enter(inner: Arc<StoreInner>) -> Self {
        inner.holds.enter();
        Self { inner }
    }
}

impl Drop for HoldGuard {
    fn drop(&mut self) {
        self.inner.holds.exit();
    }
}

#[derive(Debug)]
struct StoreInner {
    records: Vec<Record>,
    fetch_delay: Option<Duration>,
    fail_every: Option<usize>,
    fetches: AtomicUsize,
    holds: HoldTracker,
}

/// In-memory [`Store`] with startup seeding, used as the reference store in
/// tests and demos.
///
/// Seeding mirrors the usual catalog bootstrap: when constructed non-empty it
/// holds `n` records named `Product 1..=n` priced at `10.0 * i`. The builder
/// can additionally inject a fixed per-fetch delay and a deterministic fault
/// (every n-th fetch fails), which is how tests exercise the harness's
/// contained-failure policy.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

impl MemoryStore {
    /// Creates a store seeded with the default 50 records.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for a customized store.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }

    /// Number of holds currently in flight.
    pub fn active_holds(&self) -> usize {
        self.inner.holds.current.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holds observed so far.
    pub fn peak_holds(&self) -> usize {
        self.inner.holds.peak.load(Ordering::SeqCst)
    }

    /// Total number of `fetch_all` calls served (successful or failed).
    pub fn fetches(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Vec<Record>, HarnessError>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let call = inner.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(delay) = inner.fetch_delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(n) = inner.fail_every {
                if call % n == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(call, "memory store failing fetch on schedule");
                    return Err(HarnessError::data_access(format!(
                        "simulated store failure on fetch {call}"
                    )));
                }
            }
            Ok(inner.records.clone())
        })
    }

    fn hold(&self, duration: Duration) -> BoxFuture<'static, Result<(), HarnessError>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let _guard = HoldGuard::enter(inner);
            tokio::time::sleep(duration).await;
            Ok(())
        })
    }

    fn record_count(&self) -> BoxFuture<'static, Result<usize, HarnessError>> {
        let count = self.inner.records.len();
        Box::pin(async move { Ok(count) })
    }
}

/// Builder for [`MemoryStore`].
pub struct MemoryStoreBuilder {
    record_count: usize,
    fetch_delay: Option<Duration>,
    fail_every: Option<usize>,
}

impl MemoryStoreBuilder {
    /// Creates a builder with the default seed of 50 records.
    pub fn new() -> Self {
        Self {
            record_count: DEFAULT_SEED_COUNT,
            fetch_delay: None,
            fail_every: None,
        }
    }

    /// Sets how many records to seed.
    ///
    /// Default: 50
    pub fn record_count(mut self, count: usize) -> Self {
        self.record_count = count;
        self
    }

    /// Adds a fixed delay to every fetch, simulating query latency.
    ///
    /// Default: none
    pub fn fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Makes every n-th fetch fail with a data-access error.
    ///
    /// `n` must be at least 1; `fail_every(1)` fails every fetch.
    /// Default: never fail
    pub fn fail_every(mut self, n: usize) -> Self {
        self.fail_every = Some(n.max(1));
        self
    }

    /// Builds the store, seeding it if a record count was requested.
    pub fn build(self) -> MemoryStore {
        let records = (1..=self.record_count as u64)
            .map(|i| Record {
                id: i,
                name: format!("Product {i}"),
                price: 10.0 * i as f64,
            })
            .collect();
        MemoryStore {
            inner: Arc::new(StoreInner {
                records,
                fetch_delay: self.fetch_delay,
                fail_every: self.fail_every,
                fetches: AtomicUsize::new(0),
                holds: HoldTracker::default(),
            }),
        }
    }
}

impl Default for MemoryStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_default_records() {
        let store = MemoryStore::new();
        let records = store.fetch_all().await.unwrap();
        assert_eq!(records.len(), 50);
        assert_eq!(records[0].name, "Product 1");
        assert_eq!(records[49].price, 500.0);
        assert_eq!(store.record_count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn fail_every_hits_the_scheduled_calls() {
        let store = MemoryStore::builder().record_count(3).fail_every(3).build();
        let mut failures = 0;
        for _ in 0..9 {
            if store.fetch_all().await.is_err() {
                failures += 1;
            }
        }
        assert_eq!(failures, 3);
        assert_eq!(store.fetches(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn hold_tracks_concurrency_and_releases() {
        let store = MemoryStore::new();
        let a = store.hold(Duration::from_secs(1));
        let b = store.hold(Duration::from_secs(1));
        let (ra, rb) = tokio::join!(a, b);
        ra.unwrap();
        rb.unwrap();
        assert_eq!(store.peak_holds(), 2);
        assert_eq!(store.active_holds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_hold_releases_the_slot() {
        let store = MemoryStore::new();
        {
            let mut fut = store.hold(Duration::from_secs(60));
            // Poll once so the guard is live, then drop mid-hold.
            tokio::select! {
                _ = &mut fut => panic!("hold finished unexpectedly"),
                _ = tokio::time::sleep(Duration::from_millis(10)) => {}
            }
            assert_eq!(store.active_holds(), 1);
        }
        assert_eq!(store.active_holds(), 0);
    }
}
