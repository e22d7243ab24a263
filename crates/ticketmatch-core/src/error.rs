//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The commit log could not be classified.
    #[error("commit log error: {0}")]
    Commit(#[from] ticketmatch_commit::CommitError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
