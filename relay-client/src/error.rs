//! Error types for the trigger client

use thiserror::Error;

/// Result type alias for trigger operations
pub type Result<T> = std::result::Result<T, TriggerError>;

/// Errors that can occur when triggering a pipeline
#[derive(Debug, Error)]
pub enum TriggerError {
    /// HTTP request failed (connection, timeout, or reading the response body)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// GitLab answered with a non-success status code
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body returned by GitLab
        message: String,
    },

    /// The HTTP client could not be built
    #[error("Invalid client configuration: {0}")]
    Client(String),
}

impl TriggerError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
