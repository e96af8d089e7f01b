//! The fixed catalog of named load scenarios.
//!
//! | scenario  | concurrency    | hold             | arrival     |
//! |-----------|----------------|------------------|-------------|
//! | light     | 10             | 0                | sequential  |
//! | medium    | 10             | 2 s              | all at once |
//! | heavy     | 30 (override)  | 3 s              | all at once |
//! | sustained | 15 (override)  | 5 s (override, ms)  | all at once |
//! | stress    | 50 (fixed)     | 0                | all at once |
//! | visual    | 15 (override)  | 10 s (override, s)  | all at once |
//!
//! Overrides apply only where the table allows them; fixed scenarios simply
//! ignore caller-supplied values, matching endpoints that took no
//! parameters. Every scenario run is stateless and independent.

use poolprobe_core::HarnessError;
use poolprobe_driver::{ArrivalPattern, BatchSpec};
use std::str::FromStr;
use std::time::Duration;

/// A named entry in the load scenario catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Sequential baseline: each operation re-fetches the full collection.
    Light,
    /// Moderate concurrency with a 2 s hold.
    Medium,
    /// Concurrency pushed near the resource pool's limit.
    Heavy,
    /// Connections held long enough to look like a leak.
    Sustained,
    /// Past pool capacity; reports per-operation success and failure.
    Stress,
    /// Long holds sized for watching a dashboard.
    Visual,
}

impl Scenario {
    /// Every catalog entry, in presentation order.
    pub const ALL: [Scenario; 6] = [
        Scenario::Light,
        Scenario::Medium,
        Scenario::Heavy,
        Scenario::Sustained,
        Scenario::Stress,
        Scenario::Visual,
    ];

    /// The scenario's catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
            Self::Sustained => "sustained",
            Self::Stress => "stress",
            Self::Visual => "visual",
        }
    }

    /// Default number of operations.
    pub fn default_concurrency(&self) -> usize {
        match self {
            Self::Light | Self::Medium => 10,
            Self::Heavy => 30,
            Self::Sustained | Self::Visual => 15,
            Self::Stress => 50,
        }
    }

    /// Default hold duration.
    pub fn default_hold(&self) -> Duration {
        match self {
            Self::Light | Self::Stress => Duration::ZERO,
            Self::Medium => Duration::from_secs(2),
            Self::Heavy => Duration::from_secs(3),
            Self::Sustained => Duration::from_secs(5),
            Self::Visual => Duration::from_secs(10),
        }
    }

    /// Arrival pattern.
    pub fn arrival(&self) -> ArrivalPattern {
        match self {
            Self::Light => ArrivalPattern::Sequential,
            _ => ArrivalPattern::AllAtOnce,
        }
    }

    /// Whether the summary carries the per-operation detail list.
    pub fn detailed(&self) -> bool {
        matches!(self, Self::Stress)
    }

    /// One-line description for the catalog listing.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Light => "Sequential queries (baseline connection usage)",
            Self::Medium => "10 concurrent queries held 2s",
            Self::Heavy => "Heavy concurrent load held 3s (concurrency overridable)",
            Self::Sustained => "Long-running queries holding connections (connections and hold_ms overridable)",
            Self::Stress => "50 queries past pool capacity, per-operation results",
            Self::Visual => "Connections held long enough to watch on a dashboard (connections and hold_secs overridable)",
        }
    }

    /// Resolves the scenario and any permitted overrides into a validated
    /// [`BatchSpec`].
    ///
    /// Overrides the table does not permit are ignored; permitted overrides
    /// are validated and rejected with
    /// [`HarnessError::InvalidParameter`] when out of range.
    pub fn resolve(&self, overrides: &ScenarioOverrides) -> Result<BatchSpec, HarnessError> {
        let concurrency = match self {
            Self::Heavy | Self::Sustained | Self::Visual => {
                overrides.concurrency.unwrap_or(self.default_concurrency())
            }
            _ => self.default_concurrency(),
        };
        if concurrency < 1 {
            return Err(HarnessError::invalid_parameter(format!(
                "concurrency must be at least 1, got {concurrency}"
            )));
        }

        let hold_duration = match self {
            Self::Sustained => overrides
                .hold_millis
                .map(Duration::from_millis)
                .unwrap_or(self.default_hold()),
            Self::Visual => overrides
                .hold_seconds
                .map(Duration::from_secs)
                .unwrap_or(self.default_hold()),
            _ => self.default_hold(),
        };

        Ok(BatchSpec::new(
            self.name(),
            concurrency,
            hold_duration,
            self.arrival(),
        ))
    }
}

impl FromStr for Scenario {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| HarnessError::invalid_parameter(format!("unknown scenario '{s}'")))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-supplied overrides, applied only where the catalog permits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioOverrides {
    /// Overrides concurrency for heavy, sustained, and visual.
    pub concurrency: Option<usize>,
    /// Overrides the hold for sustained, in milliseconds.
    pub hold_millis: Option<u64>,
    /// Overrides the hold for visual, in whole seconds.
    pub hold_seconds: Option<u64>,
}

impl ScenarioOverrides {
    /// No overrides; every scenario runs with its defaults.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sets the concurrency override.
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    /// Sets the sustained hold override in milliseconds.
    pub fn hold_millis(mut self, millis: u64) -> Self {
        self.hold_millis = Some(millis);
        self
    }

    /// Sets the visual hold override in whole seconds.
    pub fn hold_seconds(mut self, seconds: u64) -> Self {
        self.hold_seconds = Some(seconds);
        self
    }
}
