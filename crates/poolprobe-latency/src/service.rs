//! Latency injector service implementation.

use crate::config::LatencyConfig;
use crate::events::LatencyEvent;
use futures::future::BoxFuture;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tower_service::Service;

/// Samples a delay uniformly from the half-open band `[min, max)`, in whole
/// milliseconds.
fn sample_band(rng: &mut StdRng, band: (Duration, Duration)) -> Duration {
    let min_ms = band.0.as_millis() as u64;
    let max_ms = band.1.as_millis() as u64;
    let delay_ms = if max_ms > min_ms {
        rng.random_range(min_ms..max_ms)
    } else {
        min_ms
    };
    Duration::from_millis(delay_ms)
}

/// A Tower service that injects production-like variability into requests:
/// every request is delayed (mostly briefly, occasionally severely) and a
/// small fraction fail with a simulated error after the delay.
#[derive(Clone)]
pub struct LatencyInjector<S, Req, Err> {
    inner: S,
    config: Arc<LatencyConfig<Req, Err>>,
    rng: Arc<Mutex<StdRng>>,
}

impl<S, Req, Err> LatencyInjector<S, Req, Err> {
    pub(crate) fn new(inner: S, config: LatencyConfig<Req, Err>) -> Self {
        let rng = config.create_rng();
        Self {
            inner,
            config: Arc::new(config),
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}

impl<S, Req, Res, Err> Service<Req> for LatencyInjector<S, Req, Err>
where
    S: Service<Req, Response = Res, Error = Err> + Clone + Send + 'static,
    S::Future: Send + 'static,
    Req: Send + 'static,
    Res: Send + 'static,
    Err: Send + 'static,
{
    type Response = Res;
    type Error = Err;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let mut inner = self.inner.clone();
        let config = Arc::clone(&self.config);
        let rng = Arc::clone(&self.rng);

        Box::pin(async move {
            let high;
            let delay;
            let inject_error;
            {
                let mut rng = rng.lock().unwrap();
                high = rng.random::<f64>() < config.high_latency_rate;
                delay = if high {
                    sample_band(&mut rng, config.high_latency_band)
                } else {
                    sample_band(&mut rng, config.low_latency_band)
                };
                inject_error =
                    config.error_fn.is_some() && rng.random::<f64>() < config.error_rate;
            }

            if high {
                let event = LatencyEvent::HighLatencyInjected {
                    injector_name: config.name.clone(),
                    timestamp: Instant::now(),
                    delay,
                };
                config.event_listeners.emit(&event);

                #[cfg(feature = "tracing")]
                tracing::info!(
                    injector = %config.name,
                    delay_ms = delay.as_millis(),
                    "simulating high latency"
                );

                #[cfg(feature = "metrics")]
                {
                    metrics::counter!("latency_high_injections_total", "injector" => config.name.clone())
                        .increment(1);
                    metrics::histogram!("latency_injected_ms", "injector" => config.name.clone())
                        .record(delay.as_millis() as f64);
                }
            }

            tokio::time::sleep(delay).await;

            if inject_error {
                let event = LatencyEvent::ErrorInjected {
                    injector_name: config.name.clone(),
                    timestamp: Instant::now(),
                };
                config.event_listeners.emit(&event);

                #[cfg(feature = "tracing")]
                tracing::warn!(injector = %config.name, "simulating random error");

                #[cfg(feature = "metrics")]
                metrics::counter!("latency_errors_injected_total", "injector" => config.name.clone())
                    .increment(1);

                // Checked above together with the rate.
                if let Some(ref error_fn) = config.error_fn {
                    return Err(error_fn(&req));
                }
            }

            let event = LatencyEvent::PassedThrough {
                injector_name: config.name.clone(),
                timestamp: Instant::now(),
            };
            config.event_listeners.emit(&event);

            inner.call(req).await
        })
    }
}
