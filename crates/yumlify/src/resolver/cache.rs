//! Fragment-to-URL caches
//!
//! Keyed by fragment text only. The style a URL was resolved with is not part
//! of the key, so a cached URL is reused even when the style changes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tracing::trace;

/// Store of resolved URLs with expiry
#[async_trait]
pub trait FragmentCache: Send + Sync {
    /// Cached URL for `fragment`, if present and not expired
    async fn get(&self, fragment: &str) -> Option<String>;

    /// Remember `url` for `fragment`
    async fn insert(&self, fragment: String, url: String);
}

/// Shared cache backed by moka
#[derive(Clone)]
pub struct MokaFragmentCache {
    cache: Cache<String, String>,
}

impl MokaFragmentCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, 10_000)
    }

    pub fn with_capacity(ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl FragmentCache for MokaFragmentCache {
    async fn get(&self, fragment: &str) -> Option<String> {
        self.cache.get(fragment).await
    }

    async fn insert(&self, fragment: String, url: String) {
        self.cache.insert(fragment, url).await;
    }
}

/// In-process map with per-entry expiry
///
/// Expired entries are dropped on lookup and swept on every insert, so the
/// map holds at most the entries inserted within one TTL. Deterministic,
/// which makes it the cache of choice in tests.
pub struct MemoryFragmentCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, String)>>,
}

impl MemoryFragmentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Instant, String)>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl FragmentCache for MemoryFragmentCache {
    async fn get(&self, fragment: &str) -> Option<String> {
        let mut entries = self.lock();
        let cached = entries
            .get(fragment)
            .map(|(inserted, url)| (inserted.elapsed() < self.ttl, url.clone()));
        match cached {
            Some((true, url)) => Some(url),
            Some((false, _)) => {
                trace!(fragment_len = fragment.len(), "Cached URL expired");
                entries.remove(fragment);
                None
            }
            None => None,
        }
    }

    async fn insert(&self, fragment: String, url: String) {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, (inserted, _)| inserted.elapsed() < self.ttl);
        if entries.len() < before {
            trace!(swept = before - entries.len(), "Dropped expired URLs");
        }
        entries.insert(fragment, (Instant::now(), url));
    }
}
