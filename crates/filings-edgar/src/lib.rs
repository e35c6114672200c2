#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR client and filing resolver.
//!
//! This crate provides:
//!
//! - [`EdgarClient`] - rate-limited HTTP access to the EDGAR APIs,
//!   implementing the `filings-core` source traits
//! - [`FilingResolver`] - the search logic locating one 10-K or 10-Q
//!   for a requested period across a paginated submission history
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use filings_core::Cik;
//! use filings_edgar::{EdgarClient, FilingResolver};
//!
//! #[tokio::main]
//! async fn main() -> filings_core::Result<()> {
//!     let client = Arc::new(EdgarClient::new("MyApp/1.0 (contact@example.com)"));
//!     let resolver = FilingResolver::new(client);
//!
//!     let address = resolver.annual_filing(&Cik::new("320193"), 2022).await?;
//!     println!("10-K: {}", address.url());
//!
//!     Ok(())
//! }
//! ```

/// Rate-limited HTTP client for the EDGAR APIs.
pub mod client;
/// Filing resolution over submission histories.
pub mod resolver;

pub use client::EdgarClient;
pub use resolver::FilingResolver;
