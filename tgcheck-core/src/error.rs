//! Core error types for `tgcheck`.

use thiserror::Error;

/// Core error type for `tgcheck` operations.
///
/// Probe failures never surface here; they are folded into a
/// [`UsernameStatus`](crate::UsernameStatus). Only request-shape problems
/// detected before any network call are errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The username is empty, too short, or contains invalid characters.
    #[error("{0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Returns true if this error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
