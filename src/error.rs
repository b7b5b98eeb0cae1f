//! Unified error handling for route-planner operations.
//!
//! All fallible operations in this crate return [`PlanError`]. Nothing here
//! is fatal to a host application: `Unauthenticated` and `StoreUnavailable`
//! are surfaced to the caller for re-render or retry, while `AlreadyExists`
//! and `NotFound` are benign conflicts that the synchronizer reconciles
//! silently.

use thiserror::Error;

/// Unified error type for route-planner operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No authenticated identity; the operation was aborted before any
    /// store mutation.
    #[error("selection requires an authenticated user")]
    Unauthenticated,

    /// Transient transport failure talking to the selection store.
    #[error("selection store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// A selection for this (user, name) pair already exists.
    #[error("'{name}' is already selected")]
    AlreadyExists { name: String },

    /// No selection for this (user, name) pair exists.
    #[error("'{name}' is not in the selection")]
    NotFound { name: String },

    /// Generic internal error.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl PlanError {
    /// Shorthand for a `StoreUnavailable` with a formatted message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        PlanError::StoreUnavailable {
            message: message.into(),
        }
    }

    /// Benign conflicts indicate the caller's cached view was already
    /// correct; the synchronizer treats them as confirmation.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            PlanError::AlreadyExists { .. } | PlanError::NotFound { .. }
        )
    }
}

/// Result type alias for route-planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlanError::AlreadyExists {
            name: "Laguna de La Cocha".to_string(),
        };
        assert!(err.to_string().contains("Laguna de La Cocha"));
        assert!(err.to_string().contains("already selected"));

        let err = PlanError::unavailable("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_benign_classification() {
        assert!(PlanError::AlreadyExists { name: "x".into() }.is_benign());
        assert!(PlanError::NotFound { name: "x".into() }.is_benign());
        assert!(!PlanError::Unauthenticated.is_benign());
        assert!(!PlanError::unavailable("down").is_benign());
    }
}
