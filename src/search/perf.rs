//! Search Performance Recorder
//!
//! Wraps each search invocation with a monotonic timer and keeps a
//! bounded rolling history of completed searches for derived metrics.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Number of completed searches kept in the rolling history.
pub const HISTORY_LIMIT: usize = 50;

// == Search Timer ==
/// Handle returned by [`SearchPerformanceTracker::start_search`];
/// consumed when the search completes.
#[derive(Debug)]
pub struct SearchTimer {
    started: Instant,
    started_at: DateTime<Utc>,
}

impl SearchTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }
}

// == Search Performance Record ==
/// One completed search round trip. Never mutated after creation;
/// expires only by FIFO truncation of the history window.
#[derive(Debug, Clone)]
pub struct SearchPerformance {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration: Duration,
    pub cache_hit: bool,
}

// == Derived Metrics ==
/// Metrics derived from the current history window only.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMetrics {
    /// Arithmetic mean of recorded durations
    pub average_response_time: Duration,
    /// Percentage of records that were cache hits (0..=100)
    pub cache_hit_rate: f64,
    /// Number of records currently in the window
    pub total_searches: usize,
}

// == Tracker ==
/// Rolling window of recent searches, capped at [`HISTORY_LIMIT`]
/// entries with strict FIFO eviction.
#[derive(Debug, Default)]
pub struct SearchPerformanceTracker {
    history: VecDeque<SearchPerformance>,
}

impl SearchPerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a monotonic start timestamp for one search.
    pub fn start_search(&self) -> SearchTimer {
        SearchTimer::start()
    }

    /// Completes a search: computes its duration and appends the record,
    /// dropping the oldest entry once the window is full.
    pub fn end_search(&mut self, timer: SearchTimer, cache_hit: bool) {
        let record = SearchPerformance {
            started_at: timer.started_at,
            ended_at: Utc::now(),
            duration: timer.started.elapsed(),
            cache_hit,
        };

        if self.history.len() >= HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(record);
    }

    /// Derives metrics from the current window. Bounded by the window
    /// size, so cheap to call on every render.
    pub fn metrics(&self) -> SearchMetrics {
        let total = self.history.len();
        if total == 0 {
            return SearchMetrics {
                average_response_time: Duration::ZERO,
                cache_hit_rate: 0.0,
                total_searches: 0,
            };
        }

        let total_duration: Duration = self.history.iter().map(|r| r.duration).sum();
        let hits = self.history.iter().filter(|r| r.cache_hit).count();

        SearchMetrics {
            average_response_time: total_duration / total as u32,
            cache_hit_rate: hits as f64 / total as f64 * 100.0,
            total_searches: total,
        }
    }

    /// Read-only view of the current window, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &SearchPerformance> {
        self.history.iter()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn record(tracker: &mut SearchPerformanceTracker, cache_hit: bool) {
        let timer = tracker.start_search();
        tracker.end_search(timer, cache_hit);
    }

    #[test]
    fn test_empty_metrics() {
        let tracker = SearchPerformanceTracker::new();
        let metrics = tracker.metrics();
        assert_eq!(metrics.total_searches, 0);
        assert_eq!(metrics.cache_hit_rate, 0.0);
        assert_eq!(metrics.average_response_time, Duration::ZERO);
    }

    #[test]
    fn test_records_accumulate() {
        let mut tracker = SearchPerformanceTracker::new();
        record(&mut tracker, true);
        record(&mut tracker, false);

        let metrics = tracker.metrics();
        assert_eq!(metrics.total_searches, 2);
        assert_eq!(metrics.cache_hit_rate, 50.0);
    }

    #[test]
    fn test_window_is_capped_fifo() {
        let mut tracker = SearchPerformanceTracker::new();

        // First 10 are hits, the remaining 50 misses; after 60 records the
        // 10 oldest (the hits) must have been dropped.
        for i in 0..60 {
            record(&mut tracker, i < 10);
        }

        let metrics = tracker.metrics();
        assert_eq!(metrics.total_searches, HISTORY_LIMIT);
        assert_eq!(metrics.cache_hit_rate, 0.0);
    }

    #[test]
    fn test_history_order_is_oldest_first() {
        let mut tracker = SearchPerformanceTracker::new();
        record(&mut tracker, true);
        record(&mut tracker, false);

        let flags: Vec<bool> = tracker.history().map(|r| r.cache_hit).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_records_are_immutable_snapshots() {
        let mut tracker = SearchPerformanceTracker::new();
        record(&mut tracker, true);

        let first = tracker.history().next().unwrap().clone();
        record(&mut tracker, false);

        let still_first = tracker.history().next().unwrap();
        assert_eq!(still_first.cache_hit, first.cache_hit);
        assert_eq!(still_first.started_at, first.started_at);
    }
}
