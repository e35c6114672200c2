//! No-op cache implementation.

use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

use filings_core::{Cik, HistoryCache, Result, SubmissionHistory};

/// A no-op cache that doesn't store anything.
///
/// `get_history` always returns `Ok(None)` and `put_history` returns `Ok(())`.
/// Useful for disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HistoryCache for NoopCache {
    async fn get_history(&self, _cik: &Cik) -> Result<Option<SubmissionHistory>> {
        trace!("NoopCache: get_history called, returning None");
        Ok(None)
    }

    async fn put_history(&self, _cik: &Cik, _history: &SubmissionHistory) -> Result<()> {
        trace!("NoopCache: put_history called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, nothing to do");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, nothing to do");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_never_stores() {
        let cache = NoopCache::new();
        let cik = Cik::new("320193");
        let history = SubmissionHistory::new();

        cache.put_history(&cik, &history).await.unwrap();
        assert!(cache.get_history(&cik).await.unwrap().is_none());
        assert_eq!(cache.invalidate_stale(Duration::ZERO).await.unwrap(), 0);
    }
}
