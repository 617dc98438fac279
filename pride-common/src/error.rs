//! Centralized error types for PRIDE API client crates.
//!
//! This module provides a unified error type shared by the PRIDE Archive
//! REST clients, with built-in retryability classification.

use thiserror::Error;

/// Common error type for API client operations.
///
/// All errors are classified as either retryable or non-retryable,
/// which the retry policy inspects to decide whether to re-attempt
/// a failed request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response status code outside the accepted set for the verb
    #[error("[{method}] unexpected status {status} from {url}")]
    UnexpectedStatus {
        /// HTTP method of the rejected request
        method: String,
        /// Fully built request URL
        url: String,
        /// Status code returned by the service
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for API client operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Check if this error is retryable.
    ///
    /// Retryable errors are transient transport failures that may succeed
    /// on retry, such as connection errors, resets or timeouts. A response
    /// with an unexpected status code is never retryable.
    ///
    /// # Examples
    ///
    /// ```
    /// use pride_common::ApiError;
    ///
    /// let err = ApiError::unexpected_status("GET", "http://host/project", 500, "");
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Create an unexpected-status error carrying the request diagnostics.
    #[must_use]
    pub fn unexpected_status(
        method: impl Into<String>,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedStatus {
            method: method.into(),
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an invalid configuration error with the given message.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
