//! Unified Search Module
//!
//! Search filter state, the debounced URL-driven controller, the unified
//! result union, and the rolling performance recorder.

mod controller;
mod filters;
mod perf;
mod results;

pub use controller::{
    CacheStatus, SearchBackend, SearchController, SearchError, SearchPhase, SearchState,
};
pub use filters::{FilterUpdate, SearchFilters};
pub use perf::{
    SearchMetrics, SearchPerformance, SearchPerformanceTracker, SearchTimer, HISTORY_LIMIT,
};
pub use results::{
    NormalizedResults, ResultType, SearchCourse, SearchResponse, SearchTiming,
    UnifiedSearchResult,
};
