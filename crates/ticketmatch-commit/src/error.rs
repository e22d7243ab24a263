//! Commit classification error types.

use thiserror::Error;

/// Errors raised while classifying a commit log.
#[derive(Debug, Error)]
pub enum CommitError {
    /// A log line did not start with a hexadecimal hash followed by whitespace.
    #[error("malformed commit log line {line_number}: {line:?}")]
    MalformedLine {
        /// 1-based line number within the log text.
        line_number: usize,
        /// The offending line.
        line: String,
    },
}

/// Result type for commit classification.
pub type CommitResult<T> = Result<T, CommitError>;
