//! FailureMode strategy.
//!
//! By the time a strategy sees an error, the call's journal has already
//! been rolled back. The strategy only decides what the caller observes:
//! the error itself (`Revert`) or the operation's falsy value
//! (`SilentNoop`). Fatal errors always surface.

use coinledger_types::{FailureMode, Result};

/// Maps a rolled-back call's outcome to what the caller observes.
pub trait FailureStrategy {
    /// `noop` is returned in place of a swallowed error.
    fn settle<T>(&self, op: &'static str, outcome: Result<T>, noop: T) -> Result<T>;
}

impl FailureStrategy for FailureMode {
    fn settle<T>(&self, op: &'static str, outcome: Result<T>, noop: T) -> Result<T> {
        match outcome {
            Ok(value) => Ok(value),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => match self {
                Self::Revert => Err(err),
                Self::SilentNoop => {
                    tracing::debug!(op, error = %err, "Failure swallowed (silent no-op)");
                    Ok(noop)
                }
            },
        }
    }
}
