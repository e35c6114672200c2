//! Error types for filing resolution.
//!
//! This module defines [`FilingError`], the full failure taxonomy for
//! registry lookups and filing resolution. Every variant is a reported
//! outcome, never a process-fatal condition; callers map variants to
//! HTTP-like statuses via [`FilingError::status`].

use thiserror::Error;

use crate::types::{FormType, Quarter};

/// Errors that can occur while resolving companies and filings.
#[derive(Error, Debug)]
pub enum FilingError {
    /// The requested year is outside the accepted range.
    #[error("Invalid year: {0} (expected 1900 through next year)")]
    InvalidYear(i32),

    /// The requested quarter is not 1 through 4.
    #[error("Invalid quarter: {0} (must be 1, 2, 3, or 4)")]
    InvalidQuarter(u32),

    /// No company in the registry matched the given name or ticker.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// An external fetch failed: transport error, non-success status, or a
    /// body that could not be parsed.
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The data was well-formed but no filing satisfied the query.
    #[error("No {form} filing found for {}", period_label(*year, *quarter))]
    NoMatchingFiling {
        /// The form type searched for.
        form: FormType,
        /// The requested filing year.
        year: i32,
        /// The requested quarter, for quarterly queries.
        quarter: Option<Quarter>,
    },

    /// Error interacting with a history cache.
    #[error("Cache error: {0}")]
    Cache(String),
}

impl FilingError {
    /// Short machine-readable error code for the external interface.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidYear(_) => "invalid_year",
            Self::InvalidQuarter(_) => "invalid_quarter",
            Self::CompanyNotFound(_) => "company_not_found",
            Self::FetchFailed(_) => "fetch_failed",
            Self::NoMatchingFiling { .. } => "no_matching_filing",
            Self::Cache(_) => "cache_error",
        }
    }

    /// HTTP-like status for the external interface.
    ///
    /// Invalid input maps to 400, lookup and search misses to 404, and
    /// transport or cache failures to 500.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidYear(_) | Self::InvalidQuarter(_) => 400,
            Self::CompanyNotFound(_) | Self::NoMatchingFiling { .. } => 404,
            Self::FetchFailed(_) | Self::Cache(_) => 500,
        }
    }
}

fn period_label(year: i32, quarter: Option<Quarter>) -> String {
    match quarter {
        Some(q) => format!("{year} {q}"),
        None => year.to_string(),
    }
}

/// Result type alias using [`FilingError`].
pub type Result<T> = std::result::Result<T, FilingError>;
