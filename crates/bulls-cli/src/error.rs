//! Command line error types using thiserror.

use bulls_common::BullsError;

/// Errors surfaced by `bulls` commands.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Fetch, analysis, rendering or configuration failure.
    #[error(transparent)]
    Bulls(#[from] BullsError),

    /// Writing command output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request was well formed but nothing matched it.
    #[error("{0}")]
    NoData(String),

    /// One or more `verify` checks did not pass.
    #[error("{failed} of {total} checks failed")]
    VerifyFailed {
        /// Failed checks
        failed: usize,
        /// Checks run
        total: usize,
    },
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;
