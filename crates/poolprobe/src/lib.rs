//! Load-generation harness for exercising bounded resource pools.
//!
//! `poolprobe` deliberately stresses a shared resource pool (typically a
//! database connection pool) under controlled concurrency patterns so
//! operators can validate pool sizing, timeout behavior, and monitoring
//! dashboards. It launches batches of operations that each acquire a pool
//! slot, fetch data, and optionally keep the slot occupied for a configured
//! hold duration, then reports per-operation and aggregate statistics.
//!
//! # Components
//!
//! - **Driver** (`driver` feature): a fixed-capacity worker pool and the
//!   batch driver that launches operations all at once or sequentially and
//!   never loses an outcome
//! - **Latency** (`latency` feature): a Tower layer that reproduces
//!   production variability on the single-item path, with mostly small
//!   delays, rare severe ones, and rarer simulated errors
//! - **Scenario** (`scenario` feature): the named catalog (light, medium,
//!   heavy, sustained, stress, visual) with caller overrides and
//!   serializable summaries
//!
//! # Usage
//!
//! Enable the components you need:
//!
//! ```toml
//! [dependencies]
//! poolprobe = { version = "0.1", features = ["scenario"] }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "scenario")]
//! # {
//! use poolprobe::driver::{ConcurrencyDriver, WorkerPool};
//! use poolprobe::scenario::{Scenario, ScenarioOverrides, ScenarioRunner};
//! use poolprobe::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), poolprobe::HarnessError> {
//! let driver = ConcurrencyDriver::new(Arc::new(MemoryStore::new()), WorkerPool::new(50));
//! let runner = ScenarioRunner::new(driver);
//!
//! let summary = runner.run(Scenario::Stress, ScenarioOverrides::none()).await?;
//! println!("{} failed of {}", summary.failed, summary.requested);
//! # Ok(())
//! # }
//! # }
//! ```

pub use poolprobe_core::{
    error, events, store, HarnessError, MemoryStore, Record, Store,
};

/// Worker pool and batch driver. Requires the `driver` feature.
#[cfg(feature = "driver")]
pub use poolprobe_driver as driver;

/// Latency and failure injection. Requires the `latency` feature.
#[cfg(feature = "latency")]
pub use poolprobe_latency as latency;

/// Scenario catalog and summaries. Requires the `scenario` feature.
#[cfg(feature = "scenario")]
pub use poolprobe_scenario as scenario;
