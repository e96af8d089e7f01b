//! Configuration for the latency injector.

use crate::events::LatencyEvent;
use poolprobe_core::{EventListeners, FnListener};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

/// Probability that a request draws the high-latency band.
pub const HIGH_LATENCY_RATE: f64 = 0.10;
/// Probability that a request fails with a simulated error after its delay.
pub const ERROR_RATE: f64 = 0.01;
/// High-latency band, sampled uniformly over `[min, max)`.
pub const HIGH_LATENCY_BAND: (Duration, Duration) =
    (Duration::from_millis(500), Duration::from_millis(1000));
/// Low-latency band, sampled uniformly over `[min, max)`.
pub const LOW_LATENCY_BAND: (Duration, Duration) =
    (Duration::from_millis(10), Duration::from_millis(50));

/// Type alias for error generation function.
type ErrorFn<Req, Err> = Arc<dyn Fn(&Req) -> Err + Send + Sync>;

/// Configuration for the latency injector.
///
/// The rates and bands default to the fixed production-variability profile
/// ([`HIGH_LATENCY_RATE`], [`ERROR_RATE`], [`HIGH_LATENCY_BAND`],
/// [`LOW_LATENCY_BAND`]); the builder can override them, which tests use to
/// force a branch deterministically.
pub struct LatencyConfig<Req, Err> {
    pub(crate) name: String,
    pub(crate) high_latency_rate: f64,
    pub(crate) high_latency_band: (Duration, Duration),
    pub(crate) low_latency_band: (Duration, Duration),
    pub(crate) error_rate: f64,
    pub(crate) error_fn: Option<ErrorFn<Req, Err>>,
    pub(crate) seed: Option<u64>,
    pub(crate) event_listeners: EventListeners<LatencyEvent>,
}

impl<Req, Err> Clone for LatencyConfig<Req, Err> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            high_latency_rate: self.high_latency_rate,
            high_latency_band: self.high_latency_band,
            low_latency_band: self.low_latency_band,
            error_rate: self.error_rate,
            error_fn: self.error_fn.clone(),
            seed: self.seed,
            event_listeners: self.event_listeners.clone(),
        }
    }
}

impl<Req, Err> LatencyConfig<Req, Err> {
    /// Creates a new builder.
    pub fn builder() -> LatencyConfigBuilder<Req, Err> {
        LatencyConfigBuilder::new()
    }

    pub(crate) fn create_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Builder for [`LatencyConfig`].
pub struct LatencyConfigBuilder<Req, Err> {
    name: String,
    high_latency_rate: f64,
    high_latency_band: (Duration, Duration),
    low_latency_band: (Duration, Duration),
    error_rate: f64,
    error_fn: Option<ErrorFn<Req, Err>>,
    seed: Option<u64>,
    event_listeners: EventListeners<LatencyEvent>,
}

impl<Req, Err> LatencyConfigBuilder<Req, Err> {
    /// Creates a builder preloaded with the fixed variability profile.
    pub fn new() -> Self {
        Self {
            name: "latency-injector".to_string(),
            high_latency_rate: HIGH_LATENCY_RATE,
            high_latency_band: HIGH_LATENCY_BAND,
            low_latency_band: LOW_LATENCY_BAND,
            error_rate: ERROR_RATE,
            error_fn: None,
            seed: None,
            event_listeners: EventListeners::new(),
        }
    }

    /// Sets the name of this injector instance for observability.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Overrides the high-latency probability (clamped to `0.0..=1.0`).
    ///
    /// Default: [`HIGH_LATENCY_RATE`]
    pub fn high_latency_rate(mut self, rate: f64) -> Self {
        self.high_latency_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Overrides the high-latency band `[min, max)`.
    ///
    /// Default: [`HIGH_LATENCY_BAND`]
    pub fn high_latency_band(mut self, min: Duration, max: Duration) -> Self {
        self.high_latency_band = (min, max);
        self
    }

    /// Overrides the low-latency band `[min, max)`.
    ///
    /// Default: [`LOW_LATENCY_BAND`]
    pub fn low_latency_band(mut self, min: Duration, max: Duration) -> Self {
        self.low_latency_band = (min, max);
        self
    }

    /// Overrides the simulated-error probability (clamped to `0.0..=1.0`).
    ///
    /// Default: [`ERROR_RATE`]
    pub fn error_rate(mut self, rate: f64) -> Self {
        self.error_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the function that builds the simulated error.
    ///
    /// Without one, error injection is disabled regardless of the rate.
    pub fn error_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Req) -> Err + Send + Sync + 'static,
    {
        self.error_fn = Some(Arc::new(f));
        self
    }

    /// Seeds the random source for deterministic injection sequences.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Registers a callback for high-latency injections.
    ///
    /// The callback receives the sampled delay.
    pub fn on_high_latency<F>(mut self, f: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if let LatencyEvent::HighLatencyInjected { delay, .. } = event {
                f(*delay);
            }
        }));
        self
    }

    /// Registers a callback for injected errors.
    pub fn on_error_injected<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if matches!(event, LatencyEvent::ErrorInjected { .. }) {
                f();
            }
        }));
        self
    }

    /// Registers a callback for requests that complete normally.
    pub fn on_passed_through<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.event_listeners.add(FnListener::new(move |event| {
            if matches!(event, LatencyEvent::PassedThrough { .. }) {
                f();
            }
        }));
        self
    }

    /// Builds the configuration and returns a [`crate::LatencyInjectorLayer`].
    pub fn build(self) -> crate::layer::LatencyInjectorLayer<Req, Err> {
        let config = LatencyConfig {
            name: self.name,
            high_latency_rate: self.high_latency_rate,
            high_latency_band: self.high_latency_band,
            low_latency_band: self.low_latency_band,
            error_rate: self.error_rate,
            error_fn: self.error_fn,
            seed: self.seed,
            event_listeners: self.event_listeners,
        };
        crate::layer::LatencyInjectorLayer::new(config)
    }
}

impl<Req, Err> Default for LatencyConfigBuilder<Req, Err> {
    fn default() -> Self {
        Self::new()
    }
}
