#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Caching implementations for submission histories.
//!
//! This crate provides implementations of the [`HistoryCache`] trait from
//! `filings-core`:
//!
//! - [`InMemoryCache`] - in-memory cache with optional TTL
//! - [`NoopCache`] - no-op cache that doesn't store anything

/// In-memory cache implementation.
pub mod memory;
/// No-op cache implementation.
pub mod noop;

// Re-export the trait for convenience
pub use filings_core::HistoryCache;

// Re-export implementations
pub use memory::InMemoryCache;
pub use noop::NoopCache;
