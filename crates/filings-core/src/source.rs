//! Source traits for fetching upstream data.
//!
//! These traits are the injection seams between the resolution logic and the
//! network. Production code implements them over HTTP; tests implement them
//! over canned data, so the core logic never needs live network access.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;
use crate::types::{Cik, OverflowPage, SubmissionHistory};

/// Source of submission histories for a CIK.
///
/// A failed fetch surfaces as [`FilingError::FetchFailed`](crate::FilingError::FetchFailed);
/// implementations must not panic on upstream errors.
#[async_trait]
pub trait SubmissionSource: Send + Sync + Debug {
    /// Fetches the primary submission history for a CIK.
    async fn fetch_history(&self, cik: &Cik) -> Result<SubmissionHistory>;

    /// Fetches one overflow page of submission history.
    ///
    /// Overflow pages are fragments of the same parallel-array shape; any
    /// overflow references they themselves carry are ignored (pagination is
    /// bounded, not recursive).
    async fn fetch_overflow(&self, page: &OverflowPage) -> Result<SubmissionHistory>;
}

/// Source of the bulk company snapshot document.
///
/// Returns the raw snapshot bytes; parsing and index construction happen in
/// `filings-index`, which never performs I/O itself.
#[async_trait]
pub trait SnapshotSource: Send + Sync + Debug {
    /// Fetches the raw bytes of the company snapshot.
    async fn fetch_snapshot(&self) -> Result<Vec<u8>>;
}
