//! Tower layer for the latency injector.

use crate::config::LatencyConfig;
use crate::service::LatencyInjector;
use tower_layer::Layer;

/// Layer that wraps a fetch service with randomized delay and failure
/// injection.
pub struct LatencyInjectorLayer<Req, Err> {
    config: LatencyConfig<Req, Err>,
}

impl<Req, Err> LatencyInjectorLayer<Req, Err> {
    /// Creates a layer from a finished configuration.
    pub fn new(config: LatencyConfig<Req, Err>) -> Self {
        Self { config }
    }

    /// Creates a builder preloaded with the fixed variability profile.
    pub fn builder() -> crate::config::LatencyConfigBuilder<Req, Err> {
        crate::config::LatencyConfigBuilder::new()
    }
}

impl<Req, Err> Clone for LatencyInjectorLayer<Req, Err> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<S, Req, Err> Layer<S> for LatencyInjectorLayer<Req, Err> {
    type Service = LatencyInjector<S, Req, Err>;

    fn layer(&self, service: S) -> Self::Service {
        LatencyInjector::new(service, self.config.clone())
    }
}
