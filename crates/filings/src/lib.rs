#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC filing locator.
//!
//! This crate ties the workspace together: the company index from
//! `filings-index`, the EDGAR client and resolver from `filings-edgar`, and
//! the caches from `filings-cache`, behind a single [`FilingService`] that
//! speaks the external request/response shape.
//!
//! # Example
//!
//! ```rust,ignore
//! use filings::{FilingRequest, FilingService, RequestType};
//!
//! #[tokio::main]
//! async fn main() -> filings::Result<()> {
//!     let service = FilingService::bootstrap("MyApp/1.0 (contact@example.com)").await?;
//!
//!     let response = service
//!         .handle(&FilingRequest::annual("AAPL", 2022))
//!         .await;
//!     println!("{:?}", response.filing_url);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use filings_core::*;

// Company registry index
pub use filings_index::CompanyIndex;

// EDGAR client and resolver
pub use filings_edgar::{EdgarClient, FilingResolver};

// Cache implementations
pub use filings_cache::{InMemoryCache, NoopCache};

mod service;
pub use service::{ErrorBody, FilingRequest, FilingResponse, FilingService, RequestType};
