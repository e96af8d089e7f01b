//! Batch parameters and result types.

use poolprobe_core::HarnessError;
use serde::Serialize;
use std::time::{Duration, SystemTime};

/// How a batch's operations arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPattern {
    /// Launch every operation at once and wait for all of them.
    AllAtOnce,
    /// Run operations one at a time, each to completion before the next.
    Sequential,
}

/// Validated parameters for one batch run.
///
/// Immutable once built; validation happens before anything launches.
#[derive(Debug, Clone)]
pub struct BatchSpec {
    /// Name of the scenario this batch belongs to.
    pub scenario_name: String,
    /// Number of operations to launch.
    pub concurrency: usize,
    /// How long each operation keeps its slot after the fetch.
    pub hold_duration: Duration,
    /// Arrival pattern for the batch.
    pub arrival: ArrivalPattern,
}

impl BatchSpec {
    /// Creates a spec for a named batch.
    pub fn new(
        scenario_name: impl Into<String>,
        concurrency: usize,
        hold_duration: Duration,
        arrival: ArrivalPattern,
    ) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            concurrency,
            hold_duration,
            arrival,
        }
    }

    /// Rejects parameters that must never reach the launch path.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.concurrency < 1 {
            return Err(HarnessError::invalid_parameter(format!(
                "concurrency must be at least 1, got {}",
                self.concurrency
            )));
        }
        Ok(())
    }
}

/// Terminal status of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    /// The fetch (and hold, if any) completed.
    Success,
    /// The fetch or hold failed, or the operation was interrupted.
    Failed,
}

/// What one operation produced, immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    /// Ordinal of this operation within its batch.
    #[serde(rename = "query")]
    pub index: usize,
    /// Terminal status.
    pub status: OperationStatus,
    /// Elapsed time for this operation alone, including any wait for a
    /// worker slot.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Records fetched, when successful.
    #[serde(rename = "results", skip_serializing_if = "Option::is_none")]
    pub result_size: Option<usize>,
    /// Captured error message, when failed.
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl OperationOutcome {
    /// A successful outcome with the number of fetched records.
    pub fn success(index: usize, duration: Duration, result_size: usize) -> Self {
        Self {
            index,
            status: OperationStatus::Success,
            duration,
            result_size: Some(result_size),
            error_detail: None,
        }
    }

    /// A failed outcome carrying the captured error message.
    pub fn failure(index: usize, duration: Duration, error_detail: impl Into<String>) -> Self {
        Self {
            index,
            status: OperationStatus::Failed,
            duration,
            result_size: None,
            error_detail: Some(error_detail.into()),
        }
    }

    /// Returns `true` for successful outcomes.
    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }

    /// Returns `true` if the captured error is the interrupted marker.
    pub fn is_interrupted(&self) -> bool {
        self.error_detail
            .as_deref()
            .is_some_and(|detail| detail == HarnessError::Interrupted.to_string())
    }
}

/// Everything a completed batch produced.
///
/// A batch never returns partial results: `outcomes` holds exactly
/// `requested_concurrency` entries, ordered by ordinal index, once the run
/// returns. The report is handed to the stats aggregator and then discarded;
/// nothing is persisted.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Name of the scenario that produced this batch.
    pub scenario_name: String,
    /// Number of operations that were requested (and launched).
    pub requested_concurrency: usize,
    /// Wall-clock time the batch started.
    pub started_at: SystemTime,
    /// Wall-clock duration from first launch to last terminal state.
    ///
    /// Concurrent work overlaps, so this is not the sum of the per-operation
    /// durations.
    pub total_duration: Duration,
    /// Per-operation outcomes, ordered by ordinal index.
    pub outcomes: Vec<OperationOutcome>,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(duration.as_millis() as u64)
}
