//! Randomized latency and failure injection for the poolprobe single-item
//! path.
//!
//! The public-facing single-record fetch is meant to look like a production
//! endpoint, not a lab fixture. This crate wraps that fetch in a Tower layer
//! that reproduces production variability: every request is delayed, 10% of
//! them severely (uniform in 500–1000 ms) and the rest briefly (uniform in
//! 10–50 ms), and after the delay 1% fail with a simulated error instead of
//! returning the fetched value. The rates and bands are fixed configuration
//! constants; the random source is seedable so tests can verify the stated
//! probabilities exactly.
//!
//! This layer is independent of the concurrency driver: batch scenarios never
//! pass through it.
//!
//! # Example
//!
//! ```rust
//! use poolprobe_latency::LatencyInjectorLayer;
//! use tower::Layer;
//!
//! # async fn example() {
//! let injector = LatencyInjectorLayer::builder()
//!     .name("products-by-id")
//!     .error_fn(|_req: &u64| {
//!         std::io::Error::new(std::io::ErrorKind::Other, "simulated random error")
//!     })
//!     .build();
//!
//! let service = injector.layer(tower::service_fn(|id: u64| async move {
//!     Ok::<String, std::io::Error>(format!("record {id}"))
//! }));
//! # }
//! ```
//!
//! # Deterministic testing
//!
//! ```rust
//! use poolprobe_latency::LatencyInjectorLayer;
//!
//! let injector = LatencyInjectorLayer::<u64, std::io::Error>::builder()
//!     .seed(42) // same seed, same sequence of delays and errors
//!     .build();
//! ```

pub mod config;
pub mod events;
pub mod layer;
pub mod service;

pub use config::{
    LatencyConfig, LatencyConfigBuilder, ERROR_RATE, HIGH_LATENCY_BAND, HIGH_LATENCY_RATE,
    LOW_LATENCY_BAND,
};
pub use events::LatencyEvent;
pub use layer::LatencyInjectorLayer;
pub use service::LatencyInjector;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::{Layer, Service, ServiceExt};

    async fn echo(id: u64) -> Result<u64, &'static str> {
        Ok(id)
    }

    #[tokio::test(start_paused = true)]
    async fn forced_error_replaces_the_response() {
        let layer = LatencyInjectorLayer::builder()
            .error_rate(1.0)
            .error_fn(|_req: &u64| "simulated random error")
            .low_latency_band(Duration::ZERO, Duration::ZERO)
            .high_latency_rate(0.0)
            .seed(7)
            .build();
        let mut service = layer.layer(tower::service_fn(echo));

        let result = service.ready().await.unwrap().call(1).await;
        assert_eq!(result.unwrap_err(), "simulated random error");
    }

    #[tokio::test(start_paused = true)]
    async fn high_band_delay_is_observed() {
        let delays = Arc::new(AtomicUsize::new(0));
        let d = Arc::clone(&delays);
        let layer = LatencyInjectorLayer::builder()
            .high_latency_rate(1.0)
            .high_latency_band(Duration::from_millis(500), Duration::from_millis(1000))
            .error_rate(0.0)
            .on_high_latency(move |delay| {
                assert!(delay >= Duration::from_millis(500));
                assert!(delay < Duration::from_millis(1000));
                d.fetch_add(1, Ordering::SeqCst);
            })
            .seed(42)
            .build();
        let mut service = layer.layer(tower::service_fn(echo));

        let start = tokio::time::Instant::now();
        let response = service.ready().await.unwrap().call(9).await.unwrap();
        assert_eq!(response, 9);
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(delays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn high_latency_success_still_counts_as_passed_through() {
        let passed = Arc::new(AtomicUsize::new(0));
        let p = Arc::clone(&passed);
        let layer = LatencyInjectorLayer::<u64, &'static str>::builder()
            .high_latency_rate(1.0)
            .high_latency_band(Duration::from_millis(500), Duration::from_millis(1000))
            .error_rate(0.0)
            .on_passed_through(move || {
                p.fetch_add(1, Ordering::SeqCst);
            })
            .seed(5)
            .build();
        let mut service = layer.layer(tower::service_fn(echo));

        for id in 0..3 {
            assert!(service.ready().await.unwrap().call(id).await.is_ok());
        }
        assert_eq!(passed.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_same_sequence() {
        let make = || {
            let layer = LatencyInjectorLayer::builder()
                .error_rate(0.5)
                .error_fn(|_req: &u64| "boom")
                .low_latency_band(Duration::ZERO, Duration::ZERO)
                .high_latency_rate(0.0)
                .seed(123)
                .build();
            layer.layer(tower::service_fn(echo))
        };
        let mut first = make();
        let mut second = make();

        for id in 0..20 {
            let a = first.ready().await.unwrap().call(id).await;
            let b = second.ready().await.unwrap().call(id).await;
            assert_eq!(a.is_ok(), b.is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn without_error_fn_no_errors_are_injected() {
        let layer = LatencyInjectorLayer::<u64, &'static str>::builder()
            .error_rate(1.0)
            .low_latency_band(Duration::ZERO, Duration::ZERO)
            .high_latency_rate(0.0)
            .seed(1)
            .build();
        let mut service = layer.layer(tower::service_fn(echo));

        for id in 0..5 {
            assert!(service.ready().await.unwrap().call(id).await.is_ok());
        }
    }
}
