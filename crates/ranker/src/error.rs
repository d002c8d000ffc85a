//! Error types for the ranking engine
//!
//! Construction is the only fallible path through this crate (see the
//! module-level docs on [`crate::engine`]); the hot-path operations
//! (`add_rsv`, `rewind`, iteration) are infallible given their
//! preconditions.

use thiserror::Error;

/// Result type alias for ranker construction
pub type RankerResult<T> = std::result::Result<T, RankerError>;

/// Errors that can occur while constructing a [`crate::engine::RankingEngine`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankerError {
    /// A construction parameter violated its contract
    /// (`documents == 0`, `top_k == 0`, or `top_k > documents`).
    #[error("invalid construction parameter: {0}")]
    InvalidParameter(String),

    /// The arena supplied (or sized) for this engine could not satisfy
    /// an allocation required at construction time.
    #[error("arena allocation failed: requested {requested} bytes, {available} available")]
    AllocationFailed {
        /// Bytes requested by the failing allocation
        requested: usize,
        /// Bytes remaining in the arena at the time of the request
        available: usize,
    },
}

impl RankerError {
    /// True if this is a parameter-validation error, as opposed to a
    /// resource failure.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, RankerError::InvalidParameter(_))
    }

    /// True if this is an allocation failure.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, RankerError::AllocationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = RankerError::InvalidParameter("top_k must be > 0".to_string());
        assert!(err.to_string().contains("top_k must be > 0"));
        assert!(err.is_invalid_parameter());
        assert!(!err.is_allocation_failure());
    }

    #[test]
    fn test_allocation_failed_display() {
        let err = RankerError::AllocationFailed {
            requested: 1024,
            available: 512,
        };
        let msg = err.to_string();
        assert!(msg.contains("1024"));
        assert!(msg.contains("512"));
        assert!(err.is_allocation_failure());
        assert!(!err.is_invalid_parameter());
    }
}
