//! HTTP Data Gateway
//!
//! Stateless transport to the remote content API. Issues typed requests,
//! normalizes failures into [`crate::error::ApiError`], and returns every
//! success in a uniform envelope. Parameter-order canonicalization is the
//! cache layer's job, not the transport's.

mod client;
mod types;

pub use client::ApiClient;
pub use types::{ApiResponse, RequestOptions};
