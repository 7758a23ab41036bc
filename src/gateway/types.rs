//! Gateway request/response types
//!
//! The envelope here is the only response shape the cache-aware service
//! depends on.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

// == Request Options ==
/// Per-call options for gateway requests.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers as name/value pairs
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the URL
    pub params: Vec<(String, String)>,
    /// Per-request deadline; unlimited when None
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options carrying only query parameters.
    pub fn with_params(params: Vec<(String, String)>) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }
}

// == Api Response ==
/// Uniform success envelope for all gateway calls.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// Decoded response body (JSON value, or a string for non-JSON bodies)
    pub data: Value,
    /// HTTP status code
    pub status: u16,
    /// Always true on the success path
    pub success: bool,
    /// Server-provided message when present, "OK" otherwise
    pub message: String,
}
