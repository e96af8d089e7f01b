//! Concurrency driver for the poolprobe load harness.
//!
//! This crate launches batches of resource-holding operations against a
//! [`poolprobe_core::Store`] and collects every outcome:
//!
//! - [`WorkerPool`]: a fixed-capacity, explicitly constructed set of
//!   execution slots. Operations beyond capacity queue in FIFO order.
//! - [`ConcurrencyDriver`]: validates a [`BatchSpec`], launches its
//!   operations all at once or sequentially, and waits for every one of them
//!   to reach a terminal state. Failures are contained per operation;
//!   [`BatchReport::outcomes`] always holds exactly the requested number of
//!   entries, ordered by ordinal.
//!
//! # Example
//!
//! ```rust,no_run
//! use poolprobe_core::MemoryStore;
//! use poolprobe_driver::{ArrivalPattern, BatchSpec, ConcurrencyDriver, WorkerPool};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), poolprobe_core::HarnessError> {
//! let driver = ConcurrencyDriver::new(Arc::new(MemoryStore::new()), WorkerPool::new(50));
//!
//! let report = driver
//!     .run(BatchSpec::new(
//!         "medium",
//!         10,
//!         Duration::from_secs(2),
//!         ArrivalPattern::AllAtOnce,
//!     ))
//!     .await?;
//!
//! assert_eq!(report.outcomes.len(), 10);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod driver;
pub mod events;
mod operation;
pub mod pool;

pub use batch::{ArrivalPattern, BatchReport, BatchSpec, OperationOutcome, OperationStatus};
pub use driver::{ConcurrencyDriver, ConcurrencyDriverBuilder};
pub use events::DriverEvent;
pub use pool::{WorkerPool, DEFAULT_CAPACITY};
