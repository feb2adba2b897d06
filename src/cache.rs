use crate::config::CacheConfig;
use crate::error::app_error::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Canonical cache key: `namespace` or `namespace:name=value&name=value`.
///
/// Parameters keep insertion order, so callers must add them in a fixed order
/// for identical queries to share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(namespace: &str) -> Self {
        CacheKey(namespace.to_string())
    }

    pub fn with(mut self, name: &str, value: impl fmt::Display) -> Self {
        let separator = if self.0.contains(':') { '&' } else { ':' };
        self.0.push(separator);
        self.0.push_str(name);
        self.0.push('=');
        self.0.push_str(&urlencoding::encode(&value.to_string()));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    inserted_at: Instant,
    ttl: Duration,
    sequence: u64,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) < self.ttl
    }
}

/// Keys dropped by one invalidation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Scope {
    Prefix(String),
    /// The bare namespace key and every `namespace:...` key.
    Namespace(String),
}

impl Scope {
    fn covers(&self, key: &CacheKey) -> bool {
        match self {
            Scope::Prefix(prefix) => key.as_str().starts_with(prefix.as_str()),
            Scope::Namespace(namespace) => key
                .as_str()
                .strip_prefix(namespace.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(':')),
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    /// Sequence number of the latest invalidation of each scope.
    invalidated: HashMap<Scope, u64>,
}

impl CacheState {
    fn invalidated_since(&self, key: &CacheKey, sequence: u64) -> bool {
        self.invalidated.iter().any(|(scope, at)| *at > sequence && scope.covers(key))
    }
}

/// Session-wide response cache for upstream reads.
///
/// Values are stored as JSON so one cache serves every response type.
/// Failed fetches are never stored, and neither is a fetch that was
/// overtaken by an invalidation of its key.
#[derive(Debug)]
pub struct ResponseCache {
    state: Mutex<CacheState>,
    next_sequence: AtomicU64,
    max_entries: usize,
    cleanup_interval: Duration,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            next_sequence: AtomicU64::new(0),
            max_entries: config.max_entries.max(1),
            cleanup_interval: Duration::from_secs(config.cleanup_interval_seconds.max(1)),
        }
    }

    pub fn spawn_cleanup_task(self: Arc<Self>) {
        let cleanup_interval = self.cleanup_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cleanup_interval);
            loop {
                ticker.tick().await;
                let purged = self.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "purged expired cache entries");
                }
            }
        });
    }

    fn next_sequence(&self) -> u64 {
        self.next_sequence.fetch_add(1, Ordering::Relaxed)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let now = Instant::now();
        let state = self.state.lock().await;
        let entry = state.entries.get(key).filter(|entry| entry.is_fresh(now))?;

        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "cached value has unexpected shape, treating as miss");
                None
            }
        }
    }

    pub async fn insert<T: Serialize>(&self, key: CacheKey, value: &T, ttl: Duration) {
        self.store(key, value, ttl, None).await;
    }

    /// Stores `value` unless `fetch_started` is set and the key was
    /// invalidated after that point.
    async fn store<T: Serialize>(&self, key: CacheKey, value: &T, ttl: Duration, fetch_started: Option<u64>) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "value could not be cached");
                return;
            }
        };

        let now = Instant::now();
        let mut state = self.state.lock().await;
        if fetch_started.is_some_and(|started| state.invalidated_since(&key, started)) {
            debug!(key = %key, "invalidated while fetching, result not cached");
            return;
        }

        let entries = &mut state.entries;
        if !entries.contains_key(&key) && entries.len() >= self.max_entries {
            entries.retain(|_, entry| entry.is_fresh(now));
            if entries.len() >= self.max_entries {
                if let Some(oldest) = entries.iter().min_by_key(|(_, entry)| entry.sequence).map(|(k, _)| k.clone()) {
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                ttl,
                sequence: self.next_sequence(),
            },
        );
    }

    /// Returns the fresh cached value for `key`, or runs `fetch` and stores its
    /// success under `key` for `ttl`.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: CacheKey, ttl: Duration, fetch: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(hit) = self.get(&key).await {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        debug!(key = %key, "cache miss");
        let started = self.next_sequence();
        let value = fetch().await?;
        self.store(key, &value, ttl, Some(started)).await;
        Ok(value)
    }

    async fn invalidate(&self, scope: Scope) -> usize {
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|key, _| !scope.covers(key));
        let removed = before - state.entries.len();

        debug!(scope = ?scope, removed, "invalidated cache entries");
        let at = self.next_sequence();
        state.invalidated.insert(scope, at);
        removed
    }

    /// Drops every entry whose key starts with `prefix`. Returns how many went.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        self.invalidate(Scope::Prefix(prefix.to_string())).await
    }

    /// Drops the bare `namespace` key and every `namespace:...` key, leaving
    /// namespaces that merely share a prefix (`campaigns` vs `campaignstats`).
    pub async fn invalidate_namespace(&self, namespace: &str) -> usize {
        self.invalidate(Scope::Namespace(namespace.to_string())).await
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|_, entry| entry.is_fresh(now));
        before - state.entries.len()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn cache() -> ResponseCache {
        ResponseCache::new(&CacheConfig::default())
    }

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn keys_are_canonical() {
        let key = CacheKey::new("campaigns").with("client", "Tech Corp").with("status", "Active");
        assert_eq!(key.as_str(), "campaigns:client=Tech%20Corp&status=Active");
        assert_eq!(CacheKey::new("clients").as_str(), "clients");
    }

    #[tokio::test]
    async fn fresh_hit_skips_fetcher() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value: Vec<String> = cache
                .get_or_fetch(CacheKey::new("feed-fields").with("validation", "abc"), MINUTE, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec!["job_title".to_string()])
                })
                .await
                .unwrap();
            assert_eq!(value, vec!["job_title".to_string()]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_entry_refetches() {
        let cache = cache();
        cache.insert(CacheKey::new("jobstats"), &42u32, Duration::ZERO).await;
        assert_eq!(cache.get::<u32>(&CacheKey::new("jobstats")).await, None);

        let value: u32 = cache.get_or_fetch(CacheKey::new("jobstats"), MINUTE, || async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = cache();
        let result: Result<u32, AppError> = cache
            .get_or_fetch(CacheKey::new("campaigns"), MINUTE, || async { Err(AppError::NotFound("gone".into())) })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn prefix_invalidation_is_scoped() {
        let cache = cache();
        cache.insert(CacheKey::new("campaigns").with("client", "a"), &1u8, MINUTE).await;
        cache.insert(CacheKey::new("campaigns"), &2u8, MINUTE).await;
        cache.insert(CacheKey::new("clients"), &3u8, MINUTE).await;

        assert_eq!(cache.invalidate_prefix("campaigns").await, 2);
        assert_eq!(cache.get::<u8>(&CacheKey::new("clients")).await, Some(3));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn namespace_invalidation_respects_boundaries() {
        let cache = cache();
        cache.insert(CacheKey::new("campaigns").with("client", "a"), &1u8, MINUTE).await;
        cache.insert(CacheKey::new("campaigns"), &2u8, MINUTE).await;
        cache.insert(CacheKey::new("campaignstats").with("org", 1), &3u8, MINUTE).await;

        assert_eq!(cache.invalidate_namespace("campaigns").await, 2);
        assert_eq!(cache.get::<u8>(&CacheKey::new("campaignstats").with("org", 1)).await, Some(3));
    }

    #[tokio::test]
    async fn invalidation_during_fetch_discards_the_stale_result() {
        let cache = cache();
        let key = CacheKey::new("campaigns").with("client", "a");

        let value: u8 = cache
            .get_or_fetch(key.clone(), MINUTE, || async {
                cache.invalidate_namespace("campaigns").await;
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(value, 1);
        assert_eq!(cache.get::<u8>(&key).await, None);

        // other namespaces are unaffected
        let clients = CacheKey::new("clients");
        let _: u8 = cache
            .get_or_fetch(clients.clone(), MINUTE, || async {
                cache.invalidate_namespace("campaigns").await;
                Ok(2)
            })
            .await
            .unwrap();
        assert_eq!(cache.get::<u8>(&clients).await, Some(2));

        let _: u8 = cache.get_or_fetch(key.clone(), MINUTE, || async { Ok(3) }).await.unwrap();
        assert_eq!(cache.get::<u8>(&key).await, Some(3));
    }

    #[tokio::test]
    async fn prefix_invalidation_during_fetch_discards_the_stale_result() {
        let cache = cache();
        let key = CacheKey::new("jobstats").with("org", 552499);

        let _: u8 = cache
            .get_or_fetch(key.clone(), MINUTE, || async {
                cache.invalidate_prefix("jobstats:").await;
                Ok(1)
            })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let cache = cache();
        cache.insert(CacheKey::new("a"), &1u8, Duration::ZERO).await;
        cache.insert(CacheKey::new("b"), &1u8, MINUTE).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn capacity_evicts_oldest() {
        let config = CacheConfig {
            max_entries: 2,
            ..CacheConfig::default()
        };
        let cache = ResponseCache::new(&config);
        cache.insert(CacheKey::new("first"), &1u8, MINUTE).await;
        cache.insert(CacheKey::new("second"), &2u8, MINUTE).await;
        cache.insert(CacheKey::new("third"), &3u8, MINUTE).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get::<u8>(&CacheKey::new("first")).await, None);
        assert_eq!(cache.get::<u8>(&CacheKey::new("third")).await, Some(3));
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_miss() {
        let cache = cache();
        cache.insert(CacheKey::new("clients"), &"text", MINUTE).await;
        assert_eq!(cache.get::<u32>(&CacheKey::new("clients")).await, None);
    }
}
