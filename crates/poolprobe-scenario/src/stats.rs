//! Reduction of batch reports into response-shaped summaries.

use poolprobe_driver::{BatchReport, OperationOutcome};
use serde::Serialize;

/// The caller-facing summary of one batch.
///
/// Serialized field names follow the harness's established response shape:
/// `test`, `queries`, `successful`, `failed`, `duration_ms`,
/// `results_count`, and (stress only) `details`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Scenario name.
    #[serde(rename = "test")]
    pub scenario: String,
    /// Operations requested.
    #[serde(rename = "queries")]
    pub requested: usize,
    /// Operations that succeeded.
    pub successful: usize,
    /// Operations that failed.
    pub failed: usize,
    /// Wall-clock duration of the batch in milliseconds.
    pub duration_ms: u64,
    /// Total records fetched across all successful operations.
    pub results_count: usize,
    /// Per-operation detail, present only for detailed scenarios.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<OperationOutcome>>,
}

/// Reduces a completed batch into a [`BatchSummary`].
///
/// Pure function over already-materialized data; it cannot fail.
pub fn summarize(report: &BatchReport, detailed: bool) -> BatchSummary {
    let successful = report.outcomes.iter().filter(|o| o.is_success()).count();
    let results_count = report
        .outcomes
        .iter()
        .filter_map(|o| o.result_size)
        .sum();

    BatchSummary {
        scenario: report.scenario_name.clone(),
        requested: report.requested_concurrency,
        successful,
        failed: report.requested_concurrency - successful,
        duration_ms: report.total_duration.as_millis() as u64,
        results_count,
        details: detailed.then(|| report.outcomes.clone()),
    }
}
