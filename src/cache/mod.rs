//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, bounded size, and
//! pattern-based invalidation for the catalog data layer.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::cache_key;
pub use stats::{CacheCounters, StoreStats};
pub use store::CacheStore;

use std::time::Duration;

// == Public Constants ==
/// Maximum number of entries the store holds before evicting
pub const MAX_ENTRIES: usize = 200;

/// Default TTL for cached entries
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// TTL for cached search results
pub const SEARCH_TTL: Duration = Duration::from_secs(10 * 60);

/// Interval between background expiry sweeps
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);
