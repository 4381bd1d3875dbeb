//! Error types for the BCS CLI
//!
//! Library errors are mapped to messages that tell the user what to check
//! next.

use bcs_client::{BcsError, StatusError};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// User-facing error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// No API key was supplied
    #[error("Missing API key. Pass --api-key or set BCS_API_KEY.")]
    MissingApiKey,

    /// The API rejected the request
    #[error("API request failed: {0}. {hint}", hint = status_hint(.0))]
    Api(StatusError),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists or run 'bcs download' first.")]
    FileNotFound(String),

    /// The bulk file could not be scanned
    #[error("Invalid bulk file: {0}. Check the file was downloaded completely.")]
    InvalidBulkFile(String),

    /// Any other client failure
    #[error("{0}")]
    Client(BcsError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables and flags.")]
    Config(String),

    /// JSON encoding failed
    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn status_hint(status: &StatusError) -> &'static str {
    match status {
        StatusError::BadRequest => "Check the customer ID.",
        StatusError::Unauthorized | StatusError::Forbidden => {
            "Check the API key and that it has access to this customer."
        },
        StatusError::InternalError => "The API had a problem; try again later.",
        StatusError::Unknown(_) => "Check the base URL and customer ID.",
    }
}

impl From<BcsError> for CliError {
    fn from(err: BcsError) -> Self {
        match err {
            BcsError::MissingApiKey => CliError::MissingApiKey,
            BcsError::Status(status) => CliError::Api(status),
            BcsError::InvalidConfig(msg) => CliError::Config(msg),
            BcsError::Io(io) => CliError::Io(io),
            err @ (BcsError::MalformedLine { .. } | BcsError::LineTooLong { .. }) => {
                CliError::InvalidBulkFile(err.to_string())
            },
            other => CliError::Client(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_errors_carry_hints() {
        let err = CliError::from(BcsError::Status(StatusError::Unauthorized));
        let msg = err.to_string();
        assert!(msg.starts_with("API request failed: unauthorized."));
        assert!(msg.contains("API key"));
    }

    #[test]
    fn test_scan_errors_are_invalid_bulk_file() {
        let err = CliError::from(BcsError::LineTooLong {
            line: 3,
            max_line_bytes: 10,
        });
        assert!(matches!(err, CliError::InvalidBulkFile(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_invalid_config_keeps_message() {
        let err = CliError::from(BcsError::invalid_config("BCS_TIMEOUT_SECS must be a number"));
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("BCS_TIMEOUT_SECS"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = CliError::from(BcsError::MissingApiKey);
        assert!(err.to_string().contains("BCS_API_KEY"));
    }
}
