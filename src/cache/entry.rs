//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: stored value plus creation time and TTL.
///
/// Entries are owned exclusively by the store and replaced wholesale on
/// overwrite; nothing outside the store mutates them.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub data: V,
    /// Creation timestamp (monotonic)
    pub created_at: Instant,
    /// Time-to-live from creation
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once strictly more than `ttl` has elapsed since
    /// creation, so a value set with TTL `T` is still retrievable at exactly
    /// `T` and absent after it.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    // == Time To Live ==
    /// Returns remaining TTL, saturating at zero once elapsed.
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.created_at.elapsed())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("value", Duration::from_secs(60));
        assert_eq!(entry.data, "value");
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("value", Duration::from_millis(50));
        assert!(!entry.is_expired());

        sleep(Duration::from_millis(80));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("value", Duration::from_secs(10));
        let remaining = entry.ttl_remaining();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("value", Duration::from_millis(10));
        sleep(Duration::from_millis(30));
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new("value", Duration::ZERO);
        sleep(Duration::from_millis(5));
        assert!(entry.is_expired());
    }
}
