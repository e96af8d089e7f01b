//! Batch-shape and timing invariants for the concurrency driver.

use poolprobe_core::MemoryStore;
use poolprobe_driver::{ArrivalPattern, BatchSpec, ConcurrencyDriver, WorkerPool};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn driver(store: &MemoryStore, capacity: usize) -> ConcurrencyDriver {
    ConcurrencyDriver::new(Arc::new(store.clone()), WorkerPool::new(capacity))
}

#[tokio::test]
async fn all_at_once_yields_one_outcome_per_ordinal() {
    let store = MemoryStore::new();
    let report = driver(&store, 50)
        .run(BatchSpec::new(
            "shape",
            25,
            Duration::ZERO,
            ArrivalPattern::AllAtOnce,
        ))
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 25);
    let indices: HashSet<usize> = report.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices.len(), 25);
    assert!(indices.iter().all(|&i| i < 25));
    // Restored to ordinal order regardless of completion order.
    for (i, outcome) in report.outcomes.iter().enumerate() {
        assert_eq!(outcome.index, i);
    }
}

#[tokio::test]
async fn concurrent_holds_overlap_instead_of_serializing() {
    let store = MemoryStore::new();
    let hold = Duration::from_millis(200);
    let report = driver(&store, 50)
        .run(BatchSpec::new("overlap", 10, hold, ArrivalPattern::AllAtOnce))
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 10);
    assert!(report.outcomes.iter().all(|o| o.is_success()));
    // With capacity above the batch size, total time is about one hold, not
    // ten of them stacked end to end.
    assert!(report.total_duration >= hold);
    assert!(
        report.total_duration < hold * 5,
        "batch serialized: took {:?}",
        report.total_duration
    );
    assert_eq!(store.peak_holds(), 10);
}

#[tokio::test]
async fn sequential_arrival_stacks_durations() {
    let store = MemoryStore::new();
    let hold = Duration::from_millis(100);
    let report = driver(&store, 50)
        .run(BatchSpec::new("baseline", 4, hold, ArrivalPattern::Sequential))
        .await
        .unwrap();

    assert!(report.total_duration >= hold * 4);
    assert_eq!(store.peak_holds(), 1);
}

#[tokio::test]
async fn zero_concurrency_never_launches() {
    let store = MemoryStore::new();
    let err = driver(&store, 50)
        .run(BatchSpec::new(
            "rejected",
            0,
            Duration::ZERO,
            ArrivalPattern::AllAtOnce,
        ))
        .await
        .unwrap_err();

    assert!(err.is_invalid_parameter());
    assert_eq!(store.fetches(), 0);
}

#[tokio::test]
async fn partial_failure_keeps_the_batch_measuring() {
    let store = MemoryStore::builder().fail_every(5).build();
    let report = driver(&store, 50)
        .run(BatchSpec::new(
            "flaky",
            20,
            Duration::ZERO,
            ArrivalPattern::Sequential,
        ))
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 20);
    let failed = report.outcomes.iter().filter(|o| !o.is_success()).count();
    assert_eq!(failed, 4);
    for outcome in report.outcomes.iter().filter(|o| !o.is_success()) {
        assert!(outcome
            .error_detail
            .as_deref()
            .unwrap()
            .contains("simulated store failure"));
    }
}
