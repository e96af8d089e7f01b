//! Runs a few catalog scenarios against the in-memory store and prints
//! their summaries as JSON.
//!
//! ```sh
//! cargo run --example run_scenarios --features full,tracing
//! ```

use poolprobe::driver::{ConcurrencyDriver, WorkerPool};
use poolprobe::scenario::{Scenario, ScenarioOverrides, ScenarioRunner};
use poolprobe::{HarnessError, MemoryStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), HarnessError> {
    tracing_subscriber::fmt::init();

    let store = MemoryStore::new();
    let driver = ConcurrencyDriver::builder(Arc::new(store))
        .worker_pool(WorkerPool::new(50))
        .on_batch_completed(|duration, failed| {
            println!("batch finished in {duration:?} with {failed} failures");
        })
        .build();
    let runner = ScenarioRunner::new(driver);

    let catalog = runner.catalog().await?;
    print_json(&catalog);

    // Zero-hold scenarios with defaults.
    for scenario in [Scenario::Light, Scenario::Stress] {
        let summary = runner.run(scenario, ScenarioOverrides::none()).await?;
        print_json(&summary);
    }

    // A sustained run, shortened so the example stays quick.
    let summary = runner
        .run(
            Scenario::Sustained,
            ScenarioOverrides::none().concurrency(8).hold_millis(200),
        )
        .await?;
    print_json(&summary);

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("serialization failed: {err}"),
    }
}
