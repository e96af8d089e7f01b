//! Events emitted by the concurrency driver.

use poolprobe_core::HarnessEvent;
use std::time::{Duration, Instant};

/// Batch lifecycle events.
#[derive(Debug, Clone)]
pub enum DriverEvent {
    /// The batch passed validation and is about to launch.
    BatchStarted {
        /// Scenario the batch belongs to.
        scenario: String,
        /// When the batch started.
        timestamp: Instant,
        /// Number of operations being launched.
        concurrency: usize,
    },
    /// One operation reached a terminal state.
    OperationFinished {
        /// Scenario the batch belongs to.
        scenario: String,
        /// When the operation finished.
        timestamp: Instant,
        /// The operation's ordinal within the batch.
        index: usize,
        /// The operation's own elapsed time.
        duration: Duration,
        /// Whether it succeeded.
        success: bool,
    },
    /// Every operation reached a terminal state.
    BatchCompleted {
        /// Scenario the batch belongs to.
        scenario: String,
        /// When the batch completed.
        timestamp: Instant,
        /// Wall-clock duration of the whole batch.
        duration: Duration,
        /// Number of failed operations.
        failed: usize,
    },
}

impl HarnessEvent for DriverEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::BatchStarted { .. } => "batch_started",
            Self::OperationFinished { .. } => "operation_finished",
            Self::BatchCompleted { .. } => "batch_completed",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            Self::BatchStarted { timestamp, .. }
            | Self::OperationFinished { timestamp, .. }
            | Self::BatchCompleted { timestamp, .. } => *timestamp,
        }
    }

    fn source(&self) -> &str {
        match self {
            Self::BatchStarted { scenario, .. }
            | Self::OperationFinished { scenario, .. }
            | Self::BatchCompleted { scenario, .. } => scenario,
        }
    }
}
