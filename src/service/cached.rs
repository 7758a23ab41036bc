//! Cache-aware wrapper around the API client.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CacheStore};
use crate::catalog::endpoints;
use crate::catalog::{BlogPost, Category, City, Course, CourseTiming, Paginated, SitemapEntry};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::gateway::{ApiClient, ApiResponse, RequestOptions};
use crate::search::{SearchBackend, SearchFilters, SearchResponse};

/// Outcome shared between concurrent callers of one in-flight fetch.
type SharedOutcome = std::result::Result<Value, ApiError>;

// == Cached Fetch Result ==
/// A fetched value plus whether it was served from the cache.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    pub data: T,
    pub cache_hit: bool,
}

// == Cached Api Service ==
/// Read-through caching layer over [`ApiClient`].
pub struct CachedApiService {
    client: ApiClient,
    cache: Arc<RwLock<CacheStore<Value>>>,
    /// In-flight fetches by cache key; concurrent identical misses
    /// subscribe to the first request instead of fetching again. The map
    /// holds only the receiving side: the sender lives on the leader's
    /// stack, so a cancelled fetch closes the channel and waiters recover
    /// instead of blocking on a channel nobody feeds.
    pending: Mutex<HashMap<String, broadcast::Receiver<SharedOutcome>>>,
    search_ttl: Duration,
    request_timeout: Option<Duration>,
}

impl CachedApiService {
    // == Constructors ==
    pub fn new(
        client: ApiClient,
        cache: Arc<RwLock<CacheStore<Value>>>,
        search_ttl: Duration,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            cache,
            pending: Mutex::new(HashMap::new()),
            search_ttl,
            request_timeout,
        }
    }

    /// Builds the client and cache store from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ApiClient::from_config(config)?;
        let cache = Arc::new(RwLock::new(CacheStore::new(
            config.max_entries,
            config.default_ttl,
        )));
        Ok(Self::new(
            client,
            cache,
            config.search_ttl,
            config.request_timeout,
        ))
    }

    /// Shared handle to the underlying store, for the background sweep
    /// and stats tasks.
    pub fn cache(&self) -> Arc<RwLock<CacheStore<Value>>> {
        Arc::clone(&self.cache)
    }

    // == Read-Through Core ==
    /// Returns the cached value for `(endpoint, params)` if present,
    /// otherwise runs `fetch`, stores its payload with the resolved TTL,
    /// and reports a miss.
    ///
    /// Concurrent calls for the same key share one underlying fetch;
    /// joiners report a miss since they waited on the network. If the
    /// leading call is cancelled mid-fetch its channel closes, and the
    /// next caller (or a waiting joiner) takes over the fetch itself.
    pub async fn fetch_cached<F, Fut>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        ttl: Option<Duration>,
        fetch: F,
    ) -> Result<Cached<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ApiResponse>>,
    {
        let key = cache_key(endpoint, params);

        // Loop until a result is observed or leadership is won; the
        // leader path always breaks out with the sending side.
        let sender = loop {
            if let Some(data) = self.cache.write().await.get(&key) {
                debug!(%key, "cache hit");
                return Ok(Cached {
                    data,
                    cache_hit: true,
                });
            }

            // Join an identical in-flight request if one exists.
            let mut pending = self.pending.lock().await;
            if let Some(live) = pending.get(&key) {
                let mut rx = live.resubscribe();
                drop(pending);
                debug!(%key, "joining in-flight request");
                match rx.recv().await {
                    Ok(Ok(data)) => {
                        return Ok(Cached {
                            data,
                            cache_hit: false,
                        })
                    }
                    Ok(Err(error)) => return Err(error),
                    // The leader went away without reporting: remove its
                    // dead entry and come back around to take over.
                    Err(_) => {
                        let mut pending = self.pending.lock().await;
                        if let Some(entry) = pending.get_mut(&key) {
                            if matches!(entry.try_recv(), Err(TryRecvError::Closed)) {
                                pending.remove(&key);
                            }
                        }
                        continue;
                    }
                }
            }

            let (sender, rx) = broadcast::channel(1);
            pending.insert(key.clone(), rx);
            drop(pending);
            break sender;
        };

        debug!(%key, "cache miss, fetching");
        let outcome = fetch().await;

        if let Ok(response) = &outcome {
            self.cache
                .write()
                .await
                .set(key.clone(), response.data.clone(), ttl);
        }

        let shared: SharedOutcome = match &outcome {
            Ok(response) => Ok(response.data.clone()),
            Err(error) => Err(error.clone()),
        };
        self.pending.lock().await.remove(&key);
        let _ = sender.send(shared);

        outcome.map(|response| Cached {
            data: response.data,
            cache_hit: false,
        })
    }

    fn options(&self, params: &[(String, String)]) -> RequestOptions {
        RequestOptions {
            params: params.to_vec(),
            timeout: self.request_timeout,
            ..RequestOptions::default()
        }
    }

    async fn get_cached(
        &self,
        endpoint: &str,
        params: &[(String, String)],
        ttl: Option<Duration>,
    ) -> Result<Cached<Value>> {
        self.fetch_cached(endpoint, params, ttl, || {
            self.client.get(endpoint, self.options(params))
        })
        .await
    }

    // == Typed Catalog Accessors ==
    pub async fn categories(&self) -> Result<Cached<Vec<Category>>> {
        decode(self.get_cached(endpoints::CATEGORIES, &[], None).await?)
    }

    pub async fn cities(&self) -> Result<Cached<Vec<City>>> {
        decode(self.get_cached(endpoints::CITIES, &[], None).await?)
    }

    pub async fn city(&self, slug: &str) -> Result<Cached<City>> {
        let endpoint = format!("{}/{}", endpoints::CITIES, slug);
        decode(self.get_cached(&endpoint, &[], None).await?)
    }

    pub async fn courses(&self, params: &[(String, String)]) -> Result<Cached<Paginated<Course>>> {
        decode(self.get_cached(endpoints::COURSES, params, None).await?)
    }

    pub async fn course(&self, slug: &str) -> Result<Cached<Course>> {
        let endpoint = format!("{}/{}", endpoints::COURSES, slug);
        decode(self.get_cached(&endpoint, &[], None).await?)
    }

    pub async fn upcoming_courses(&self) -> Result<Cached<Vec<CourseTiming>>> {
        decode(self.get_cached(endpoints::UPCOMING_COURSES, &[], None).await?)
    }

    pub async fn blogs(&self, page: u32) -> Result<Cached<Paginated<BlogPost>>> {
        let params = vec![("page".to_string(), page.to_string())];
        decode(self.get_cached(endpoints::BLOGS, &params, None).await?)
    }

    pub async fn blog(&self, slug: &str) -> Result<Cached<BlogPost>> {
        let endpoint = format!("{}/{}", endpoints::BLOGS, slug);
        decode(self.get_cached(&endpoint, &[], None).await?)
    }

    pub async fn sitemap(&self) -> Result<Cached<Vec<SitemapEntry>>> {
        decode(self.get_cached(endpoints::SITEMAP, &[], None).await?)
    }

    // == Domain Invalidation ==
    /// Clears every cached key under an endpoint prefix, leaving other
    /// domains intact.
    async fn clear_domain(&self, prefix: &str) -> usize {
        let pattern = format!("^{}", regex::escape(prefix));
        let removed = self.cache.write().await.clear_by_pattern(&pattern);
        info!(prefix, removed, "cleared cached domain");
        removed
    }

    pub async fn clear_categories_cache(&self) -> usize {
        self.clear_domain(endpoints::CATEGORIES).await
    }

    pub async fn clear_cities_cache(&self) -> usize {
        self.clear_domain(endpoints::CITIES).await
    }

    pub async fn clear_courses_cache(&self) -> usize {
        self.clear_domain(endpoints::COURSES).await
    }

    pub async fn clear_upcoming_courses_cache(&self) -> usize {
        self.clear_domain(endpoints::UPCOMING_COURSES).await
    }

    pub async fn clear_search_cache(&self) -> usize {
        self.clear_domain(endpoints::SEARCH).await
    }

    pub async fn clear_all(&self) {
        self.cache.write().await.clear();
        info!("cleared entire cache");
    }

    // == Preload ==
    /// Fires off the default no-filter fetches concurrently at startup.
    /// Best effort: failures are logged and discarded so a slow or broken
    /// preload never blocks startup.
    pub async fn preload_critical_data(&self) {
        let (categories, cities, upcoming) =
            tokio::join!(self.categories(), self.cities(), self.upcoming_courses());

        if let Err(error) = categories {
            warn!(%error, "preload of categories failed");
        }
        if let Err(error) = cities {
            warn!(%error, "preload of cities failed");
        }
        if let Err(error) = upcoming {
            warn!(%error, "preload of upcoming courses failed");
        }
    }
}

// == Search Backend ==
#[async_trait]
impl SearchBackend for CachedApiService {
    /// Unified search: cached with the shorter search TTL, since filter
    /// combinations are numerous and results more volatile.
    async fn search(&self, filters: &SearchFilters) -> Result<Cached<SearchResponse>> {
        let params = filters.to_params();
        let fetched = self
            .fetch_cached(endpoints::SEARCH, &params, Some(self.search_ttl), || {
                self.client.get(endpoints::SEARCH, self.options(&params))
            })
            .await?;
        decode(fetched)
    }
}

/// Deserializes a cached JSON payload into its typed form.
fn decode<T: DeserializeOwned>(fetched: Cached<Value>) -> Result<Cached<T>> {
    let data = serde_json::from_value(fetched.data)
        .map_err(|e| ApiError::Unknown(format!("failed to decode response: {}", e)))?;
    Ok(Cached {
        data,
        cache_hit: fetched.cache_hit,
    })
}
