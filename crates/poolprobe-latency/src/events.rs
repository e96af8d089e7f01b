//! Events emitted by the latency injector.

use poolprobe_core::HarnessEvent;
use std::time::{Duration, Instant};

/// Lifecycle events for one request through the injector.
#[derive(Debug, Clone)]
pub enum LatencyEvent {
    /// The request drew the high-latency band and was delayed accordingly.
    HighLatencyInjected {
        /// Name of the injector instance.
        injector_name: String,
        /// When the delay was decided.
        timestamp: Instant,
        /// The sampled delay.
        delay: Duration,
    },
    /// A simulated error replaced the response after the delay.
    ErrorInjected {
        /// Name of the injector instance.
        injector_name: String,
        /// When the error was injected.
        timestamp: Instant,
    },
    /// The request completed without an injected error, whichever delay
    /// band it drew.
    PassedThrough {
        /// Name of the injector instance.
        injector_name: String,
        /// When the request was passed through.
        timestamp: Instant,
    },
}

impl HarnessEvent for LatencyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::HighLatencyInjected { .. } => "high_latency_injected",
            Self::ErrorInjected { .. } => "error_injected",
            Self::PassedThrough { .. } => "passed_through",
        }
    }

    fn timestamp(&self) -> Instant {
        match self {
            Self::HighLatencyInjected { timestamp, .. }
            | Self::ErrorInjected { timestamp, .. }
            | Self::PassedThrough { timestamp, .. } => *timestamp,
        }
    }

    fn source(&self) -> &str {
        match self {
            Self::HighLatencyInjected { injector_name, .. }
            | Self::ErrorInjected { injector_name, .. }
            | Self::PassedThrough { injector_name, .. } => injector_name,
        }
    }
}
