//! Error taxonomy for the load harness.
//!
//! Three things can go wrong in a scenario run, and they propagate very
//! differently:
//!
//! - [`HarnessError::InvalidParameter`] rejects the whole batch before a
//!   single operation is launched.
//! - [`HarnessError::DataAccess`] and [`HarnessError::Interrupted`] are
//!   captured inside the operation that hit them and reported as that
//!   operation's outcome. They never abort sibling operations or the batch:
//!   the harness exists to measure behavior *under* partial failure, so
//!   failure is data, not an exception.

/// Unified error type for the load harness.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HarnessError {
    /// A scenario parameter was rejected before launch.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// The backing store failed during a fetch or hold.
    #[error("data access failed: {0}")]
    DataAccess(String),

    /// The operation was cancelled while waiting for or holding a pool slot.
    #[error("operation interrupted while holding a pool slot")]
    Interrupted,
}

impl HarnessError {
    /// Creates an [`HarnessError::InvalidParameter`] from any message.
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Creates an [`HarnessError::DataAccess`] from any message.
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Returns `true` if this is a parameter-validation failure.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` if the backing store failed.
    pub fn is_data_access(&self) -> bool {
        matches!(self, Self::DataAccess(_))
    }

    /// Returns `true` if the operation was cancelled mid-flight.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
