//! catalogd - client-side data and search layer for a course-catalog site
//!
//! Provides a TTL cache with bounded size, a cache-aware wrapper over the
//! remote content API, a debounced unified-search controller, and rolling
//! search performance metrics.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod search;
pub mod service;
pub mod tasks;

pub use cache::CacheStore;
pub use config::Config;
pub use error::{ApiError, Result};
pub use gateway::{ApiClient, ApiResponse, RequestOptions};
pub use search::{SearchController, SearchFilters, SearchPerformanceTracker};
pub use service::{Cached, CachedApiService};
pub use tasks::{spawn_cleanup_task, spawn_stats_task};
