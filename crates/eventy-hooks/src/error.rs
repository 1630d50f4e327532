//! Errors raised while invoking hook listeners.

use eventy_core::error::{ErrorKind, EventyError};
use thiserror::Error;

/// Error produced by a listener invocation.
///
/// Listeners return this type themselves; the dispatcher hands whatever a
/// listener produced back to its caller untouched.
#[derive(Debug, Error)]
pub enum HookError {
    /// The callback could not be called at all.
    #[error("Cannot invoke {callback} on hook '{hook}': {reason}")]
    Invocation {
        /// Hook being dispatched.
        hook: String,
        /// Description of the callback.
        callback: String,
        /// Why the call was impossible.
        reason: String,
    },

    /// The listener ran and reported a failure.
    #[error("Listener failed: {reason}")]
    Failed {
        /// Failure description supplied by the listener.
        reason: String,
    },

    /// Any other error raised from inside a listener.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Creates a listener failure.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    /// Creates an invocation error for `callback` on `hook`.
    pub fn invocation(
        hook: impl Into<String>,
        callback: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Invocation {
            hook: hook.into(),
            callback: callback.into(),
            reason: reason.into(),
        }
    }

    /// Returns whether this is an invocation error.
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::Invocation { .. })
    }
}

/// Convenience result type for listener callbacks.
pub type HookResult<T> = Result<T, HookError>;

impl From<HookError> for EventyError {
    fn from(err: HookError) -> Self {
        let kind = if err.is_invocation() {
            ErrorKind::Invocation
        } else {
            ErrorKind::Listener
        };
        EventyError::with_source(kind, err.to_string(), err)
    }
}
