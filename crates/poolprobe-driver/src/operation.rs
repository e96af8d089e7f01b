//! A single resource-holding operation.

use crate::batch::OperationOutcome;
use crate::pool::WorkerPool;
use poolprobe_core::{HarnessError, Store};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Runs one operation to a terminal state and always produces an outcome.
///
/// The sequence is: wait for a worker slot, fetch the full collection, then
/// hold the acquired store slot for `hold_duration`. Failures and
/// cancellation are captured in the outcome, never propagated; the worker
/// slot is released on every exit path because the permit lives on this
/// function's stack. Cancellation is observed at the suspension points (the
/// wait for a worker and the hold) and reported with the distinct
/// interrupted marker rather than as success.
pub(crate) async fn execute(
    store: Arc<dyn Store>,
    pool: WorkerPool,
    index: usize,
    hold_duration: Duration,
    cancel: CancellationToken,
) -> OperationOutcome {
    let start = Instant::now();

    let _permit = tokio::select! {
        permit = pool.acquire() => match permit {
            Ok(permit) => permit,
            Err(err) => return OperationOutcome::failure(index, start.elapsed(), err.to_string()),
        },
        _ = cancel.cancelled() => {
            return OperationOutcome::failure(
                index,
                start.elapsed(),
                HarnessError::Interrupted.to_string(),
            );
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(index, "operation acquiring store connection");

    let records = match store.fetch_all().await {
        Ok(records) => records,
        Err(err) => {
            return OperationOutcome::failure(index, start.elapsed(), err.to_string());
        }
    };

    if !hold_duration.is_zero() {
        tokio::select! {
            result = store.hold(hold_duration) => {
                if let Err(err) = result {
                    return OperationOutcome::failure(index, start.elapsed(), err.to_string());
                }
            }
            _ = cancel.cancelled() => {
                #[cfg(feature = "tracing")]
                tracing::debug!(index, "operation interrupted mid-hold");
                return OperationOutcome::failure(
                    index,
                    start.elapsed(),
                    HarnessError::Interrupted.to_string(),
                );
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        index,
        held_ms = hold_duration.as_millis(),
        "operation releasing store connection"
    );

    OperationOutcome::success(index, start.elapsed(), records.len())
}
