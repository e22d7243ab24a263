//! Tracker error types.

use thiserror::Error;

/// Issue tracker errors.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// The search request could not be sent or its body read.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The tracker answered with a non-success status.
    #[error("tracker returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body is not JSON.
    #[error("invalid tracker response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// An issue in the response lacks a required field.
    #[error("invalid ticket data in issue {index}: {reason}")]
    InvalidTicketData { index: usize, reason: String },

    /// The configured base URL cannot be used.
    #[error("invalid tracker URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = TrackerError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "tracker returned HTTP 401: Unauthorized");
    }

    #[test]
    fn test_invalid_ticket_data_display() {
        let err = TrackerError::InvalidTicketData {
            index: 2,
            reason: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "invalid ticket data in issue 2: missing key");
    }

    #[test]
    fn test_invalid_response_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TrackerError = json_err.into();
        assert!(matches!(err, TrackerError::InvalidResponse(_)));
    }
}
