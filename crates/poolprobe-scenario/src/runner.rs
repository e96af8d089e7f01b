//! The scenario runner: catalog entry in, summary out.

use crate::catalog::{Scenario, ScenarioOverrides};
use crate::stats::{summarize, BatchSummary};
use poolprobe_core::HarnessError;
use poolprobe_driver::ConcurrencyDriver;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Runs catalog scenarios against a driver and aggregates their results.
///
/// The runner is the synchronous boundary of the harness: callers block until
/// the whole batch completes, then receive one serializable summary. There is
/// no partial or streaming response. Every run is independent; the runner
/// keeps no state between calls.
#[derive(Clone)]
pub struct ScenarioRunner {
    driver: ConcurrencyDriver,
}

impl ScenarioRunner {
    /// Creates a runner over a driver.
    pub fn new(driver: ConcurrencyDriver) -> Self {
        Self { driver }
    }

    /// The underlying driver.
    pub fn driver(&self) -> &ConcurrencyDriver {
        &self.driver
    }

    /// Runs a scenario with the given overrides.
    pub async fn run(
        &self,
        scenario: Scenario,
        overrides: ScenarioOverrides,
    ) -> Result<BatchSummary, HarnessError> {
        self.run_with_cancel(scenario, overrides, CancellationToken::new())
            .await
    }

    /// Runs a scenario that can be cancelled mid-flight.
    ///
    /// Cancellation does not abort the summary: interrupted operations are
    /// reported as failures and the batch still accounts for every
    /// operation.
    pub async fn run_with_cancel(
        &self,
        scenario: Scenario,
        overrides: ScenarioOverrides,
        cancel: CancellationToken,
    ) -> Result<BatchSummary, HarnessError> {
        let spec = scenario.resolve(&overrides)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            scenario = %scenario,
            concurrency = spec.concurrency,
            hold_ms = spec.hold_duration.as_millis(),
            "starting load scenario"
        );

        let report = self.driver.run_with_cancel(spec, cancel).await?;
        Ok(summarize(&report, scenario.detailed()))
    }

    /// Runs a scenario addressed by its catalog name.
    ///
    /// Unknown names fail with [`HarnessError::InvalidParameter`].
    pub async fn run_named(
        &self,
        name: &str,
        overrides: ScenarioOverrides,
    ) -> Result<BatchSummary, HarnessError> {
        let scenario: Scenario = name.parse()?;
        self.run(scenario, overrides).await
    }

    /// The informational catalog payload: every scenario with its defaults,
    /// plus the backing store's record count.
    pub async fn catalog(&self) -> Result<CatalogInfo, HarnessError> {
        let records_in_store = self.driver.store().record_count().await?;
        Ok(CatalogInfo {
            message: "load scenarios ready",
            records_in_store,
            scenarios: Scenario::ALL
                .into_iter()
                .map(|scenario| ScenarioInfo {
                    name: scenario.name(),
                    concurrency: scenario.default_concurrency(),
                    hold_ms: scenario.default_hold().as_millis() as u64,
                    arrival: scenario.arrival(),
                    description: scenario.describe(),
                })
                .collect(),
        })
    }
}

/// Informational listing of the scenario catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogInfo {
    /// Static readiness message.
    pub message: &'static str,
    /// Records currently in the backing store.
    pub records_in_store: usize,
    /// One entry per catalog scenario.
    pub scenarios: Vec<ScenarioInfo>,
}

/// One catalog entry as presented to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioInfo {
    /// Catalog name.
    pub name: &'static str,
    /// Default concurrency.
    pub concurrency: usize,
    /// Default hold in milliseconds.
    pub hold_ms: u64,
    /// Arrival pattern.
    pub arrival: poolprobe_driver::ArrivalPattern,
    /// Human-readable description.
    pub description: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolprobe_core::MemoryStore;
    use poolprobe_driver::WorkerPool;
    use std::sync::Arc;

    fn runner() -> ScenarioRunner {
        let driver =
            ConcurrencyDriver::new(Arc::new(MemoryStore::new()), WorkerPool::new(50));
        ScenarioRunner::new(driver)
    }

    #[tokio::test]
    async fn light_scenario_accumulates_sequential_fetches() {
        let summary = runner()
            .run(Scenario::Light, ScenarioOverrides::none())
            .await
            .unwrap();
        assert_eq!(summary.scenario, "light");
        assert_eq!(summary.requested, 10);
        assert_eq!(summary.successful, 10);
        // Each of the 10 sequential operations re-fetches all 50 records.
        assert_eq!(summary.results_count, 500);
        assert!(summary.details.is_none());
    }

    #[tokio::test]
    async fn unknown_scenario_name_is_invalid() {
        let err = runner()
            .run_named("warp-speed", ScenarioOverrides::none())
            .await
            .unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[tokio::test]
    async fn catalog_lists_scenarios_and_record_count() {
        let info = runner().catalog().await.unwrap();
        assert_eq!(info.records_in_store, 50);
        assert_eq!(info.scenarios.len(), 6);
        assert_eq!(info.scenarios[0].name, "light");
        assert_eq!(info.scenarios[4].concurrency, 50);
    }
}
