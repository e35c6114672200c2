//! Cache trait for storing fetched submission histories.
//!
//! Caching is a non-functional improvement: resolution is correct with no
//! cache at all, and a cache failure only costs a refetch. Implementations
//! live in the `filings-cache` crate.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::types::{Cik, SubmissionHistory};

/// Trait for caching fetched submission histories per CIK.
///
/// Overflow pages are not cached separately; a cached history carries its
/// overflow references and those pages are refetched on demand.
#[async_trait]
pub trait HistoryCache: Send + Sync {
    /// Retrieves a cached history for a CIK.
    ///
    /// Returns `Ok(Some(history))` on a hit, `Ok(None)` on a miss.
    async fn get_history(&self, cik: &Cik) -> Result<Option<SubmissionHistory>>;

    /// Stores a history in the cache.
    async fn put_history(&self, cik: &Cik, history: &SubmissionHistory) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
