//! Error types for the BCS client
//!
//! Everything in [`BcsError`] is fatal to the operation that produced it.
//! Per-record problems found while scanning a bulk stream are not errors in
//! this sense; they are collected in [`crate::bulk::BulkResults::decode_errors`].

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, BcsError>;

/// Classified non-success HTTP status returned by the API
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    #[error("bad request")]
    BadRequest,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("internal server error")]
    InternalError,

    #[error("unexpected status {0}")]
    Unknown(u16),
}

impl StatusError {
    /// Classify a response status; `None` for any 2xx.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        Some(match status.as_u16() {
            400 => StatusError::BadRequest,
            401 => StatusError::Unauthorized,
            403 => StatusError::Forbidden,
            500 => StatusError::InternalError,
            other => StatusError::Unknown(other),
        })
    }

    /// The HTTP status code this error was classified from
    pub fn code(&self) -> u16 {
        match self {
            StatusError::BadRequest => 400,
            StatusError::Unauthorized => 401,
            StatusError::Forbidden => 403,
            StatusError::InternalError => 500,
            StatusError::Unknown(code) => *code,
        }
    }
}

/// Main error type for the BCS client
#[derive(Error, Debug)]
pub enum BcsError {
    #[error("missing API key")]
    MissingApiKey,

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("API request failed: {0}")]
    Status(#[from] StatusError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be read as a JSON object; the stream is treated as corrupt
    #[error("malformed bulk line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("bulk line {line} exceeds the maximum of {max_line_bytes} bytes")]
    LineTooLong { line: usize, max_line_bytes: usize },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("operation cancelled")]
    Cancelled,
}

impl BcsError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// The classified status, if this error came from a non-success response
    pub fn status(&self) -> Option<StatusError> {
        match self {
            BcsError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusError::from_status(StatusCode::OK), None);
        assert_eq!(StatusError::from_status(StatusCode::CREATED), None);
        assert_eq!(
            StatusError::from_status(StatusCode::BAD_REQUEST),
            Some(StatusError::BadRequest)
        );
        assert_eq!(
            StatusError::from_status(StatusCode::UNAUTHORIZED),
            Some(StatusError::Unauthorized)
        );
        assert_eq!(
            StatusError::from_status(StatusCode::FORBIDDEN),
            Some(StatusError::Forbidden)
        );
        assert_eq!(
            StatusError::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(StatusError::InternalError)
        );
        assert_eq!(
            StatusError::from_status(StatusCode::NOT_FOUND),
            Some(StatusError::Unknown(404))
        );
        assert_eq!(
            StatusError::from_status(StatusCode::BAD_GATEWAY),
            Some(StatusError::Unknown(502))
        );
        assert_eq!(
            StatusError::from_status(StatusCode::MOVED_PERMANENTLY),
            Some(StatusError::Unknown(301))
        );
    }

    #[test]
    fn test_status_code_round_trip() {
        for code in [400u16, 401, 403, 418, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::IM_A_TEAPOT);
            let classified = StatusError::from_status(status);
            assert_eq!(classified.map(|s| s.code()), Some(code));
        }
    }

    #[test]
    fn test_error_exposes_status() {
        let err = BcsError::from(StatusError::Forbidden);
        assert_eq!(err.status(), Some(StatusError::Forbidden));
        assert!(BcsError::Cancelled.status().is_none());
    }
}
