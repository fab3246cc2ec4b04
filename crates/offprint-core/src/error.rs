//! Shared error taxonomy.
//!
//! Every module defines its own `thiserror` enum, but all user-facing
//! failures collapse into three categories the front end knows how to
//! present:
//!
//! - [`ErrorCategory::InvalidInput`] — rejected before any state changes
//!   (wrong file type, oversize upload, region below minimum size).
//! - [`ErrorCategory::ConversionFailure`] — an external decode step failed;
//!   state is rolled back to the pre-attempt point.
//! - [`ErrorCategory::ProcessingFailure`] — a mid-pipeline failure; the
//!   whole run is aborted and any partial output discarded.
//!
//! Errors are terminal to the current operation and never retried
//! automatically.

use serde::{Deserialize, Serialize};

/// Coarse category of a failure, used to pick the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The request was malformed or out of accepted limits.
    InvalidInput,
    /// An external decode/parse step failed.
    ConversionFailure,
    /// A failure occurred mid-pipeline during a multi-step run.
    ProcessingFailure,
}

/// Implemented by every error enum in the crate.
pub trait Categorized {
    /// The taxonomy bucket this error belongs to.
    fn category(&self) -> ErrorCategory;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_equality() {
        assert_eq!(ErrorCategory::InvalidInput, ErrorCategory::InvalidInput);
        assert_ne!(
            ErrorCategory::InvalidInput,
            ErrorCategory::ProcessingFailure
        );
    }
}
