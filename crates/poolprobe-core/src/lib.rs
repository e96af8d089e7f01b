//! Core infrastructure for the poolprobe load harness.
//!
//! This crate provides the pieces shared by every other poolprobe module:
//! - The harness error taxonomy ([`HarnessError`])
//! - An event system for observability ([`events`])
//! - The [`Store`] collaborator trait through which the harness reaches the
//!   backing store, plus [`MemoryStore`], a seeded in-memory implementation
//!   used as the reference store in tests and demos

pub mod error;
pub mod events;
pub mod store;

pub use error::HarnessError;
pub use events::{EventListener, EventListeners, FnListener, HarnessEvent};
pub use store::{MemoryStore, MemoryStoreBuilder, Record, Store};
