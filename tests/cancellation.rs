//! Cancellation behavior: interrupted outcomes and slot release.

use poolprobe_core::MemoryStore;
use poolprobe_driver::{ArrivalPattern, BatchSpec, ConcurrencyDriver, WorkerPool};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn cancelling_mid_hold_interrupts_every_operation() {
    let store = MemoryStore::new();
    let driver = ConcurrencyDriver::new(Arc::new(store.clone()), WorkerPool::new(10));
    let cancel = CancellationToken::new();

    let batch = {
        let driver = driver.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            driver
                .run_with_cancel(
                    BatchSpec::new(
                        "cancelled",
                        5,
                        Duration::from_secs(30),
                        ArrivalPattern::AllAtOnce,
                    ),
                    cancel,
                )
                .await
        })
    };

    // Let every operation reach its hold, then pull the plug.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(store.active_holds(), 5);
    cancel.cancel();

    let report = batch.await.unwrap().unwrap();
    assert_eq!(report.outcomes.len(), 5);
    for outcome in &report.outcomes {
        assert!(!outcome.is_success());
        assert!(outcome.is_interrupted(), "expected interrupted: {outcome:?}");
    }
    // Well short of the 30 s hold.
    assert!(report.total_duration < Duration::from_secs(5));
    // Every slot was released on the way out.
    assert_eq!(store.active_holds(), 0);
}

#[tokio::test]
async fn slots_are_immediately_reusable_after_cancellation() {
    let store = MemoryStore::new();
    let driver = ConcurrencyDriver::new(Arc::new(store.clone()), WorkerPool::new(5));
    let cancel = CancellationToken::new();

    let batch = {
        let driver = driver.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            driver
                .run_with_cancel(
                    BatchSpec::new(
                        "cancelled",
                        5,
                        Duration::from_secs(30),
                        ArrivalPattern::AllAtOnce,
                    ),
                    cancel,
                )
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    batch.await.unwrap().unwrap();

    // A follow-up operation acquires a slot without waiting out the old
    // holds.
    let report = driver
        .run(BatchSpec::new(
            "follow-up",
            1,
            Duration::from_millis(20),
            ArrivalPattern::AllAtOnce,
        ))
        .await
        .unwrap();
    assert!(report.outcomes[0].is_success());
    assert!(report.total_duration < Duration::from_secs(2));
}

#[tokio::test]
async fn already_cancelled_batch_reports_interrupted_not_success() {
    let store = MemoryStore::new();
    let driver = ConcurrencyDriver::new(Arc::new(store), WorkerPool::new(5));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let report = driver
        .run_with_cancel(
            BatchSpec::new(
                "stillborn",
                3,
                Duration::from_secs(30),
                ArrivalPattern::AllAtOnce,
            ),
            cancel,
        )
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    for outcome in &report.outcomes {
        assert!(outcome.is_interrupted());
    }
}
