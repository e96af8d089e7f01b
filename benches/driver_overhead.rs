use criterion::{criterion_group, criterion_main, Criterion};
use poolprobe_core::MemoryStore;
use poolprobe_driver::{ArrivalPattern, BatchSpec, ConcurrencyDriver, WorkerPool};
use std::sync::Arc;
use std::time::Duration;

/// Dispatch overhead of the driver itself: zero-hold batches against the
/// in-memory store, so the numbers are pure spawn/join/aggregate cost.
fn batch_dispatch(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap();
    let driver = ConcurrencyDriver::new(Arc::new(MemoryStore::new()), WorkerPool::new(50));

    c.bench_function("all_at_once_10_zero_hold", |b| {
        let driver = driver.clone();
        b.to_async(&rt).iter(|| {
            let driver = driver.clone();
            async move {
                driver
                    .run(BatchSpec::new(
                        "bench",
                        10,
                        Duration::ZERO,
                        ArrivalPattern::AllAtOnce,
                    ))
                    .await
                    .unwrap()
            }
        })
    });

    c.bench_function("sequential_10_zero_hold", |b| {
        let driver = driver.clone();
        b.to_async(&rt).iter(|| {
            let driver = driver.clone();
            async move {
                driver
                    .run(BatchSpec::new(
                        "bench",
                        10,
                        Duration::ZERO,
                        ArrivalPattern::Sequential,
                    ))
                    .await
                    .unwrap()
            }
        })
    });
}

criterion_group!(benches, batch_dispatch);
criterion_main!(benches);
