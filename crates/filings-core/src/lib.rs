#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for SEC filing resolution.
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace:
//!
//! - [`Cik`](types::Cik) - SEC Central Index Key with its two canonical forms
//! - [`SubmissionHistory`](types::SubmissionHistory) - the parallel-array
//!   filing history mirroring the EDGAR submissions feed
//! - [`FilingAddress`](types::FilingAddress) - canonical document locator
//! - [`SubmissionSource`](source::SubmissionSource) - injectable fetch seam
//! - [`HistoryCache`](cache::HistoryCache) - caching abstraction

/// Cache trait for storing fetched submission histories.
pub mod cache;
/// Error types for filing resolution.
pub mod error;
/// Source traits for fetching upstream data.
pub mod source;
/// Core data types (Cik, SubmissionHistory, FilingAddress, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::HistoryCache;
pub use error::{FilingError, Result};
pub use source::{SnapshotSource, SubmissionSource};
pub use types::{
    Cik, CompanyRecord, FilingAddress, FilingCandidate, FormType, OverflowPage, Quarter,
    SubmissionHistory,
};
