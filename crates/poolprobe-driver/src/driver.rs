//! The concurrency driver: batch launch, join, and result collection.

use crate::batch::{ArrivalPattern, BatchReport, BatchSpec, OperationOutcome};
use crate::events::DriverEvent;
use crate::operation;
use crate::pool::WorkerPool;
use poolprobe_core::{EventListeners, FnListener, HarnessError, Store};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tokio_util::sync::CancellationToken;

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// Launches batches of resource-holding operations and collects every
/// outcome.
///
/// The driver owns nothing global: it is built from an explicit [`Store`]
/// collaborator and an explicitly sized [`WorkerPool`], both injected at
/// construction. A batch run validates its parameters, launches operations
/// according to the arrival pattern, and waits for every launched operation
/// to reach a terminal state. Per-operation failures are captured as
/// outcomes, never as batch-level errors.
#[derive(Clone)]
pub struct ConcurrencyDriver {
    store: Arc<dyn Store>,
    pool: WorkerPool,
    listeners: EventListeners<DriverEvent>,
}

impl ConcurrencyDriver {
    /// Creates a driver from a store and a worker pool.
    pub fn new(store: Arc<dyn Store>, pool: WorkerPool) -> Self {
        Self {
            store,
            pool,
            listeners: EventListeners::new(),
        }
    }

    /// Creates a builder for a driver with event hooks.
    pub fn builder(store: Arc<dyn Store>) -> ConcurrencyDriverBuilder {
        #[cfg(feature = "metrics")]
        METRICS_INIT.call_once(|| {
            describe_counter!("driver_batches_total", "Batches run to completion");
            describe_counter!(
                "driver_operations_total",
                "Operations launched across all batches"
            );
            describe_counter!(
                "driver_operations_failed_total",
                "Operations that ended in a failure outcome"
            );
            describe_gauge!("driver_workers_in_use", "Worker slots currently occupied");
            describe_histogram!(
                "driver_batch_duration_seconds",
                "Wall-clock duration of whole batches"
            );
        });
        ConcurrencyDriverBuilder::new(store)
    }

    /// The store this driver operates against.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// The worker pool backing this driver.
    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Runs a batch to completion.
    ///
    /// Fails only with [`HarnessError::InvalidParameter`], before anything
    /// launches. Everything that goes wrong after launch is captured in the
    /// per-operation outcomes.
    pub async fn run(&self, spec: BatchSpec) -> Result<BatchReport, HarnessError> {
        self.run_with_cancel(spec, CancellationToken::new()).await
    }

    /// Runs a batch that can be cancelled mid-flight.
    ///
    /// On cancellation, in-flight operations observe the token at their next
    /// suspension point, release their slots, and report the interrupted
    /// marker; the batch still returns a full set of outcomes.
    pub async fn run_with_cancel(
        &self,
        spec: BatchSpec,
        cancel: CancellationToken,
    ) -> Result<BatchReport, HarnessError> {
        spec.validate()?;

        let started_at = SystemTime::now();
        let start = Instant::now();

        self.listeners.emit(&DriverEvent::BatchStarted {
            scenario: spec.scenario_name.clone(),
            timestamp: Instant::now(),
            concurrency: spec.concurrency,
        });

        #[cfg(feature = "tracing")]
        tracing::info!(
            scenario = %spec.scenario_name,
            concurrency = spec.concurrency,
            hold_ms = spec.hold_duration.as_millis(),
            arrival = ?spec.arrival,
            "starting batch"
        );

        #[cfg(feature = "metrics")]
        counter!("driver_operations_total", "scenario" => spec.scenario_name.clone())
            .increment(spec.concurrency as u64);

        let mut outcomes = match spec.arrival {
            ArrivalPattern::AllAtOnce => self.run_all_at_once(&spec, &cancel).await,
            ArrivalPattern::Sequential => self.run_sequential(&spec, &cancel).await,
        };

        // Completion order is unordered between operations; the report is
        // always ordered by ordinal.
        outcomes.sort_by_key(|outcome| outcome.index);

        let total_duration = start.elapsed();
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();

        self.listeners.emit(&DriverEvent::BatchCompleted {
            scenario: spec.scenario_name.clone(),
            timestamp: Instant::now(),
            duration: total_duration,
            failed,
        });

        #[cfg(feature = "tracing")]
        tracing::info!(
            scenario = %spec.scenario_name,
            duration_ms = total_duration.as_millis(),
            failed,
            "batch completed"
        );

        #[cfg(feature = "metrics")]
        {
            counter!("driver_batches_total", "scenario" => spec.scenario_name.clone())
                .increment(1);
            counter!("driver_operations_failed_total", "scenario" => spec.scenario_name.clone())
                .increment(failed as u64);
            histogram!("driver_batch_duration_seconds", "scenario" => spec.scenario_name.clone())
                .record(total_duration.as_secs_f64());
            gauge!("driver_workers_in_use").set(self.pool.in_use() as f64);
        }

        Ok(BatchReport {
            scenario_name: spec.scenario_name,
            requested_concurrency: spec.concurrency,
            started_at,
            total_duration,
            outcomes,
        })
    }

    async fn run_all_at_once(
        &self,
        spec: &BatchSpec,
        cancel: &CancellationToken,
    ) -> Vec<OperationOutcome> {
        let mut handles = Vec::with_capacity(spec.concurrency);
        for index in 0..spec.concurrency {
            let store = Arc::clone(&self.store);
            let pool = self.pool.clone();
            let cancel = cancel.clone();
            let listeners = self.listeners.clone();
            let scenario = spec.scenario_name.clone();
            let hold_duration = spec.hold_duration;

            handles.push(tokio::spawn(async move {
                let outcome =
                    operation::execute(store, pool, index, hold_duration, cancel).await;
                listeners.emit(&DriverEvent::OperationFinished {
                    scenario,
                    timestamp: Instant::now(),
                    index,
                    duration: outcome.duration,
                    success: outcome.is_success(),
                });
                outcome
            }));
        }

        // Single wait-for-all barrier. A task that panicked still yields an
        // outcome here, so the batch never silently drops an operation.
        let mut outcomes = Vec::with_capacity(spec.concurrency);
        for (index, handle) in handles.into_iter().enumerate() {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => OperationOutcome::failure(
                    index,
                    Duration::ZERO,
                    format!("operation task failed: {err}"),
                ),
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_sequential(
        &self,
        spec: &BatchSpec,
        cancel: &CancellationToken,
    ) -> Vec<OperationOutcome> {
        let mut outcomes = Vec::with_capacity(spec.concurrency);
        for index in 0..spec.concurrency {
            let outcome = operation::execute(
                Arc::clone(&self.store),
                self.pool.clone(),
                index,
                spec.hold_duration,
                cancel.clone(),
            )
            .await;
            self.listeners.emit(&DriverEvent::OperationFinished {
                scenario: spec.scenario_name.clone(),
                timestamp: Instant::now(),
                index,
                duration: outcome.duration,
                success: outcome.is_success(),
            });
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Builder for [`ConcurrencyDriver`].
pub struct ConcurrencyDriverBuilder {
    store: Arc<dyn Store>,
    pool: Option<WorkerPool>,
    listeners: EventListeners<DriverEvent>,
}

impl ConcurrencyDriverBuilder {
    fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            pool: None,
            listeners: EventListeners::new(),
        }
    }

    /// Sets the worker pool.
    ///
    /// Default: a fresh pool of [`crate::pool::DEFAULT_CAPACITY`] slots.
    pub fn worker_pool(mut self, pool: WorkerPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Registers a callback when a batch starts, with its concurrency.
    pub fn on_batch_started<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.listeners.add(FnListener::new(move |event| {
            if let DriverEvent::BatchStarted { concurrency, .. } = event {
                f(*concurrency);
            }
        }));
        self
    }

    /// Registers a callback when an operation finishes, with its ordinal and
    /// whether it succeeded.
    pub fn on_operation_finished<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, bool) + Send + Sync + 'static,
    {
        self.listeners.add(FnListener::new(move |event| {
            if let DriverEvent::OperationFinished { index, success, .. } = event {
                f(*index, *success);
            }
        }));
        self
    }

    /// Registers a callback when a batch completes, with its wall-clock
    /// duration and failed count.
    pub fn on_batch_completed<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration, usize) + Send + Sync + 'static,
    {
        self.listeners.add(FnListener::new(move |event| {
            if let DriverEvent::BatchCompleted {
                duration, failed, ..
            } = event
            {
                f(*duration, *failed);
            }
        }));
        self
    }

    /// Builds the driver.
    pub fn build(self) -> ConcurrencyDriver {
        ConcurrencyDriver {
            store: self.store,
            pool: self.pool.unwrap_or_default(),
            listeners: self.listeners,
        }
    }
}
