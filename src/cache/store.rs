//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration,
//! oldest-first size-bounded eviction, and pattern-based invalidation.

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use tracing::warn;

use crate::cache::{CacheCounters, CacheEntry, StoreStats};

// == Cache Store ==
/// Generic key/value store with expiry and bounded size.
///
/// Reads delete expired entries as a side effect; a periodic sweep
/// ([`cleanup_expired`](CacheStore::cleanup_expired)) removes the rest.
/// When the store is full, the entry with the oldest creation time is
/// evicted to make room.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lookup and eviction counters
    counters: CacheCounters,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without an explicit TTL
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new store with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Get ==
    /// Retrieves a value by key, unless it has expired.
    ///
    /// Expired entries are removed as a side effect of the read and
    /// counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.counters.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    // == Set ==
    /// Stores a key-value pair with optional TTL.
    ///
    /// Overwrites any existing entry for the same key, resetting its
    /// timestamp. If the store is at capacity and the key is new, the
    /// entry with the oldest creation time is evicted first.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest_key) = oldest {
                self.entries.remove(&oldest_key);
                self.counters.record_eviction();
            }
        }

        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Remove ==
    /// Removes an entry by key; returns whether removal occurred.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Clear By Pattern ==
    /// Removes every entry whose key matches the pattern.
    ///
    /// Used to invalidate an entire logical domain (e.g. all `/courses`
    /// keys) without enumerating them. An invalid pattern removes nothing.
    ///
    /// Returns the number of entries removed.
    pub fn clear_by_pattern(&mut self, pattern: &str) -> usize {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(error) => {
                warn!(pattern, %error, "invalid cache invalidation pattern");
                return 0;
            }
        };

        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| regex.is_match(key))
            .cloned()
            .collect();

        let count = matching.len();
        for key in matching {
            self.entries.remove(&key);
        }
        count
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, independent of reads.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
        }
        count
    }

    // == Stats ==
    /// Returns a read-only snapshot of the store. No side effects.
    pub fn stats(&self) -> StoreStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();

        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.created_at)
            .map(|(key, _)| key.clone());
        let newest_key = self
            .entries
            .iter()
            .max_by_key(|(_, entry)| entry.created_at)
            .map(|(key, _)| key.clone());

        StoreStats {
            size: self.entries.len(),
            keys,
            oldest_key,
            newest_key,
            counters: self.counters.clone(),
            captured_at: chrono::Utc::now(),
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
