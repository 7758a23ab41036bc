//! Unified Search Controller
//!
//! Owns search filter state, debounces input, consults the cache-aware
//! backend, normalizes responses into the unified result list, and
//! tracks loading/error/retry state. Errors surface as state, never as
//! panics, so presentation layers always observe them as data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::Result;
use crate::search::{
    FilterUpdate, ResultType, SearchFilters, SearchMetrics, SearchPerformanceTracker,
    SearchResponse, UnifiedSearchResult,
};
use crate::service::Cached;

// == Search Backend Seam ==
/// Boundary between the controller and the cache-aware data service.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, filters: &SearchFilters) -> Result<Cached<SearchResponse>>;
}

// == Controller State ==
/// Lifecycle phase of the current search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Whether the last applied response came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// A search failure, exposed as data with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchError {
    pub message: String,
    pub retryable: bool,
}

/// Snapshot of the controller state.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub phase: SearchPhase,
    pub filters: SearchFilters,
    pub results: Vec<UnifiedSearchResult>,
    pub result_type: Option<ResultType>,
    pub total_count: usize,
    pub cache_status: Option<CacheStatus>,
    pub error: Option<SearchError>,
}

impl SearchState {
    fn new(filters: SearchFilters) -> Self {
        Self {
            phase: SearchPhase::Idle,
            filters,
            results: Vec::new(),
            result_type: None,
            total_count: 0,
            cache_status: None,
            error: None,
        }
    }
}

// == Search Controller ==
/// Debounced, URL-driven search state controller.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn SearchBackend>,
    state: RwLock<SearchState>,
    perf: Mutex<SearchPerformanceTracker>,
    /// Filter snapshot of the most recently issued request, replayed by
    /// retry even when a newer debounced update is still pending.
    last_issued: Mutex<Option<SearchFilters>>,
    debounce: Duration,
    /// Bumped on every input change; a sleeping debounce task only fires
    /// if its generation is still current when it wakes.
    input_generation: AtomicU64,
    /// Monotonic sequence for outbound requests.
    request_seq: AtomicU64,
    /// Highest sequence whose response has been applied.
    applied_seq: AtomicU64,
}

impl SearchController {
    // == Constructors ==
    pub fn new(backend: Arc<dyn SearchBackend>, debounce: Duration) -> Self {
        Self::with_filters(backend, debounce, SearchFilters::default())
    }

    /// Starts from restored filters (e.g. parsed from the page URL).
    pub fn with_filters(
        backend: Arc<dyn SearchBackend>,
        debounce: Duration,
        filters: SearchFilters,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                state: RwLock::new(SearchState::new(filters)),
                perf: Mutex::new(SearchPerformanceTracker::new()),
                last_issued: Mutex::new(None),
                debounce,
                input_generation: AtomicU64::new(0),
                request_seq: AtomicU64::new(0),
                applied_seq: AtomicU64::new(0),
            }),
        }
    }

    // == State Access ==
    pub async fn state(&self) -> SearchState {
        self.inner.state.read().await.clone()
    }

    pub async fn cache_status(&self) -> Option<CacheStatus> {
        self.inner.state.read().await.cache_status
    }

    /// Current filters encoded for the page query string.
    pub async fn query_string(&self) -> String {
        self.inner.state.read().await.filters.to_query_string()
    }

    pub async fn metrics(&self) -> SearchMetrics {
        self.inner.perf.lock().await.metrics()
    }

    // == Input ==
    /// Shallow-merges a filter update and schedules a debounced search.
    ///
    /// Rapid updates within the quiet window coalesce: each call
    /// supersedes the previous pending timer, so only the final filter
    /// state produces a request. When `reset_page_on_keyword` is set and
    /// the update changes the keyword, the page cursor snaps back to 1;
    /// otherwise pagination is entirely caller-controlled.
    ///
    /// Returns the handle of the debounce task, mainly for tests.
    pub async fn update_filters(
        &self,
        update: FilterUpdate,
        reset_page_on_keyword: bool,
    ) -> JoinHandle<()> {
        {
            let mut state = self.inner.state.write().await;
            let keyword_changed = update.changes_keyword(&state.filters);
            update.apply(&mut state.filters);
            if reset_page_on_keyword && keyword_changed {
                state.filters.page = 1;
            }
        }

        let generation = self.inner.input_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if inner.input_generation.load(Ordering::SeqCst) != generation {
                // Superseded by a newer keystroke; never fires.
                return;
            }
            Inner::execute_current(inner).await;
        })
    }

    /// Runs a search immediately with the current filters, bypassing
    /// debounce.
    pub async fn search_now(&self) {
        Inner::execute_current(Arc::clone(&self.inner)).await;
    }

    /// Replays the last issued request unconditionally: no debounce, no
    /// filter mutation, and a still-pending debounced update does not
    /// leak into the replay. Falls back to the current filters when
    /// nothing has been issued yet.
    pub async fn retry(&self) {
        debug!("retrying last search");
        let last = self.inner.last_issued.lock().await.clone();
        let inner = Arc::clone(&self.inner);
        match last {
            Some(filters) => Inner::execute(inner, filters).await,
            None => Inner::execute_current(inner).await,
        }
    }
}

impl Inner {
    /// Issues a search for the current filter state, recording the
    /// snapshot as the last issued request.
    async fn execute_current(inner: Arc<Inner>) {
        let filters = inner.state.read().await.filters.clone();
        *inner.last_issued.lock().await = Some(filters.clone());
        Self::execute(inner, filters).await;
    }

    async fn execute(inner: Arc<Inner>, filters: SearchFilters) {
        let seq = inner.request_seq.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = inner.state.write().await;
            state.phase = SearchPhase::Loading;
            state.error = None;
        }

        let timer = inner.perf.lock().await.start_search();
        let outcome = inner.backend.search(&filters).await;

        let cache_hit = outcome
            .as_ref()
            .map(|cached| cached.cache_hit)
            .unwrap_or(false);
        inner.perf.lock().await.end_search(timer, cache_hit);

        // Apply under the state lock so an older in-flight response can
        // never overwrite a newer applied one.
        let mut state = inner.state.write().await;
        let previous = inner.applied_seq.fetch_max(seq, Ordering::SeqCst);
        if previous >= seq {
            debug!(seq, previous, "discarding stale search response");
            return;
        }

        let applied = match outcome {
            Ok(cached) => {
                let hit = cached.cache_hit;
                cached.data.normalize().map(|normalized| (normalized, hit))
            }
            Err(error) => Err(error),
        };

        match applied {
            Ok((normalized, cache_hit)) => {
                state.phase = SearchPhase::Success;
                state.results = normalized.results;
                state.result_type = Some(normalized.result_type);
                state.total_count = normalized.total_count;
                state.cache_status = Some(if cache_hit {
                    CacheStatus::Hit
                } else {
                    CacheStatus::Miss
                });
                state.error = None;
            }
            Err(error) => {
                state.phase = SearchPhase::Error;
                state.cache_status = None;
                state.error = Some(SearchError {
                    message: error.to_string(),
                    retryable: error.is_retryable(),
                });
            }
        }
    }
}
