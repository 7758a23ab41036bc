//! Cache-Aware Data Service
//!
//! Wraps the HTTP gateway with the TTL cache store: read-through on hit,
//! fetch-and-populate on miss, domain-scoped invalidation, and a
//! single-flight guard for concurrent identical misses.
//!
//! The cache instance is explicitly constructed and owned here (no
//! ambient global); the owner of the service decides when to spawn and
//! tear down the background sweep via [`crate::tasks`].

mod cached;

pub use cached::{Cached, CachedApiService};
