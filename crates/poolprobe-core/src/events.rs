//! Event system for harness observability.
//!
//! The driver and the latency injector emit events as batches and operations
//! move through their lifecycles. Consumers register listeners through the
//! `on_*` hooks on the respective builders; the hooks are backed by the
//! [`EventListeners`] registry defined here.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Trait implemented by every event the harness emits.
pub trait HarnessEvent: Send + Sync + fmt::Debug {
    /// Returns the kind of event (e.g., "batch_started", "error_injected").
    fn event_type(&self) -> &'static str;

    /// Returns when this event occurred.
    fn timestamp(&self) -> Instant;

    /// Returns the name of the component instance that emitted this event.
    fn source(&self) -> &str;
}

/// Trait for listening to harness events.
pub trait EventListener<E: HarnessEvent>: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: &E);
}

/// A collection of event listeners for one event type.
#[derive(Clone)]
pub struct EventListeners<E: HarnessEvent> {
    listeners: Vec<Arc<dyn EventListener<E>>>,
}

impl<E: HarnessEvent> EventListeners<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener.
    pub fn add<L>(&mut self, listener: L)
    where
        L: EventListener<E> + 'static,
    {
        self.listeners.push(Arc::new(listener));
    }

    /// Emits an event to every registered listener.
    ///
    /// A panicking listener is isolated: the panic is caught so the remaining
    /// listeners still observe the event.
    pub fn emit(&self, event: &E) {
        for listener in &self.listeners {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.on_event(event);
            }));
        }
    }

    /// Returns `true` if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<E: HarnessEvent> Default for EventListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// A function-based event listener.
pub struct FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    f: F,
    _marker: std::marker::PhantomData<E>,
}

impl<E, F> FnListener<E, F>
where
    F: Fn(&E) + Send + Sync,
{
    /// Wraps a function as a listener.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<E, F> EventListener<E> for FnListener<E, F>
where
    E: HarnessEvent,
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        (self.f)(event)
    }
}
