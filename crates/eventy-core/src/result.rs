//! Convenience result type alias for Eventy.

use crate::error::EventyError;

/// A specialized `Result` type for Eventy operations.
pub type EventyResult<T> = Result<T, EventyError>;
