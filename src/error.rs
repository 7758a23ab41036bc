//! Error types for the catalog data layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the data layer.
///
/// Cloneable so an in-flight failure can be shared with every caller
/// waiting on the same request.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// Request exceeded its configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx HTTP response from the remote API
    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    /// Any other failure, normalized to a generic message
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    // == Retryability ==
    /// Whether a retry has any chance of succeeding.
    ///
    /// Timeouts and server-side failures are retryable. Client errors
    /// (4xx) are not, except 408 (request timeout) and 429 (rate limit).
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout(_) => true,
            ApiError::RequestFailed { status, .. } => {
                !(400..=499).contains(status) || matches!(*status, 408 | 429)
            }
            ApiError::Unknown(_) => true,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the data layer.
pub type Result<T> = std::result::Result<T, ApiError>;
