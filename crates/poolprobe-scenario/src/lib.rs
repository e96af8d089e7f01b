//! Named load scenarios for the poolprobe harness.
//!
//! This crate holds the fixed scenario catalog (light, medium, heavy,
//! sustained, stress, visual), applies caller overrides where the catalog
//! permits them, and reduces finished batches into serializable summaries.
//!
//! # Example
//!
//! ```rust,no_run
//! use poolprobe_core::MemoryStore;
//! use poolprobe_driver::{ConcurrencyDriver, WorkerPool};
//! use poolprobe_scenario::{Scenario, ScenarioOverrides, ScenarioRunner};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), poolprobe_core::HarnessError> {
//! let driver = ConcurrencyDriver::new(Arc::new(MemoryStore::new()), WorkerPool::new(50));
//! let runner = ScenarioRunner::new(driver);
//!
//! let summary = runner
//!     .run(Scenario::Heavy, ScenarioOverrides::none().concurrency(40))
//!     .await?;
//! println!("{} of {} succeeded", summary.successful, summary.requested);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod runner;
pub mod stats;

pub use catalog::{Scenario, ScenarioOverrides};
pub use runner::{CatalogInfo, ScenarioInfo, ScenarioRunner};
pub use stats::{summarize, BatchSummary};
