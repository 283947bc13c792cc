//! Error types for classification requests.

use thiserror::Error;

/// Errors from the external classification service.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Classifier error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Reply could not be parsed into department, severity and action.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Classifier configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClassifierError {
    /// Short tag for logs and metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ClassifierError::Network(_) => "network",
            ClassifierError::Timeout(_) => "timeout",
            ClassifierError::Upstream { .. } => "upstream",
            ClassifierError::InvalidResponse(_) => "invalid_response",
            ClassifierError::Configuration(_) => "configuration",
        }
    }

    /// Map a transport error, keeping timeouts distinguishable.
    ///
    /// The request URL is stripped from the message so credentials in it
    /// never reach logs or response bodies.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ClassifierError::Timeout(timeout_ms)
        } else {
            ClassifierError::Network(err.without_url().to_string())
        }
    }
}
