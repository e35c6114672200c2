//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use filings_core::{Cik, HistoryCache, Result, SubmissionHistory};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry {
    history: SubmissionHistory,
    cached_at: chrono::DateTime<Utc>,
}

impl CacheEntry {
    fn new(history: SubmissionHistory) -> Self {
        Self {
            history,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Simple in-memory cache for submission histories.
///
/// Entries are stored in a `RwLock`-protected `HashMap` keyed by CIK and are
/// lost when the cache is dropped. With a TTL configured, stale entries are
/// treated as misses on read; without one, entries live until
/// [`invalidate_stale`](HistoryCache::invalidate_stale) or
/// [`clear`](HistoryCache::clear) removes them.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<Cik, CacheEntry>>,
    ttl: Option<Duration>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache with no TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Number of entries currently held, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryCache for InMemoryCache {
    async fn get_history(&self, cik: &Cik) -> Result<Option<SubmissionHistory>> {
        let entries = self.entries.read().await;
        match entries.get(cik) {
            Some(entry) => {
                if let Some(ttl) = self.ttl {
                    if entry.is_stale(ttl) {
                        debug!(cik = %cik, "Cache entry stale, treating as miss");
                        return Ok(None);
                    }
                }
                debug!(cik = %cik, "Cache hit for submission history");
                Ok(Some(entry.history.clone()))
            }
            None => {
                debug!(cik = %cik, "Cache miss for submission history");
                Ok(None)
            }
        }
    }

    async fn put_history(&self, cik: &Cik, history: &SubmissionHistory) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(cik.clone(), CacheEntry::new(history.clone()));
        debug!(cik = %cik, rows = history.row_count(), "Cached submission history");
        Ok(())
    }

    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "Invalidated stale cache entries");
        }
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
