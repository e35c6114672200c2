#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/edgar-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company registry index.
//!
//! [`CompanyIndex`] holds two read-only mappings, name to CIK and ticker to
//! CIK, both keyed by lower-cased strings and built in a single pass over the
//! snapshot. The index never fetches anything itself; construction takes
//! snapshot bytes or already-parsed records, so callers control where the
//! data comes from and tests need no network.

use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

use filings_core::{Cik, CompanyRecord, FilingError, Result};

/// Read-only index from company name and ticker to CIK.
///
/// Lookups are exact matches after lower-casing; substring matching is
/// exposed only through [`search`](Self::search). If the snapshot contains
/// duplicate names or tickers the last record wins - an accepted policy
/// mirroring the upstream feed, not a defect.
#[derive(Debug, Default)]
pub struct CompanyIndex {
    by_name: HashMap<String, Cik>,
    by_ticker: HashMap<String, Cik>,
}

/// One record of the snapshot document, as published.
#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    cik_str: CikField,
    ticker: String,
    title: String,
}

/// The feed has published `cik_str` both as a JSON number and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CikField {
    Number(u64),
    Text(String),
}

impl From<CikField> for Cik {
    fn from(field: CikField) -> Self {
        match field {
            CikField::Number(n) => Self::from(n),
            CikField::Text(s) => Self::new(s),
        }
    }
}

impl CompanyIndex {
    /// Builds an index from raw snapshot bytes.
    ///
    /// The snapshot is a JSON mapping from opaque keys to records carrying
    /// `cik_str`, `ticker`, and `title`. A record that is missing a field or
    /// carries an empty one is skipped with a warning; only a body that is
    /// not a JSON map at all fails the whole load.
    ///
    /// # Errors
    ///
    /// Returns [`FilingError::FetchFailed`] if the bytes are not a JSON map.
    pub fn from_snapshot_json(bytes: &[u8]) -> Result<Self> {
        let entries: HashMap<String, serde_json::Value> = serde_json::from_slice(bytes)
            .map_err(|e| FilingError::FetchFailed(format!("Failed to parse company snapshot: {e}")))?;

        let mut index = Self::default();
        for (key, value) in entries {
            match serde_json::from_value::<SnapshotRecord>(value) {
                Ok(record) => {
                    let cik = Cik::from(record.cik_str);
                    if cik.as_str().is_empty()
                        || record.ticker.trim().is_empty()
                        || record.title.trim().is_empty()
                    {
                        warn!(key = %key, "Skipping snapshot record with empty identifier, name, or ticker");
                    } else {
                        index.insert(CompanyRecord::new(cik, record.title, record.ticker));
                    }
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping malformed snapshot record");
                }
            }
        }

        debug!(companies = index.len(), "Built company index from snapshot");
        Ok(index)
    }

    /// Builds an index from already-parsed records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = CompanyRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Inserts one record, populating both maps from the same source record.
    fn insert(&mut self, record: CompanyRecord) {
        self.by_name
            .insert(record.name.to_lowercase(), record.cik.clone());
        self.by_ticker
            .insert(record.ticker.to_lowercase(), record.cik);
    }

    /// Looks up a CIK by exact company name, case-insensitively.
    #[must_use]
    pub fn cik_for_name(&self, name: &str) -> Option<&Cik> {
        self.by_name.get(&name.to_lowercase())
    }

    /// Looks up a CIK by exact ticker symbol, case-insensitively.
    #[must_use]
    pub fn cik_for_ticker(&self, ticker: &str) -> Option<&Cik> {
        self.by_ticker.get(&ticker.to_lowercase())
    }

    /// Returns all indexed names containing the given substring,
    /// case-insensitively. Unordered; may be empty.
    #[must_use]
    pub fn search(&self, partial: &str) -> Vec<&str> {
        let needle = partial.to_lowercase();
        self.by_name
            .keys()
            .filter(|name| name.contains(&needle))
            .map(String::as_str)
            .collect()
    }

    /// Number of indexed company names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if the index holds no companies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> CompanyIndex {
        CompanyIndex::from_records([
            CompanyRecord::new("320193", "Apple Inc.", "AAPL"),
            CompanyRecord::new("70858", "Bank of America Corp", "BAC"),
            CompanyRecord::new("36104", "US Bancorp", "USB"),
        ])
    }

    #[test]
    fn lookups_are_cross_consistent() {
        let index = sample_index();
        assert_eq!(
            index.cik_for_name("Apple Inc."),
            index.cik_for_ticker("AAPL")
        );
        assert_eq!(index.cik_for_ticker("AAPL").unwrap().as_str(), "320193");
    }

    #[test]
    fn lookups_are_case_insensitive() {
        let index = sample_index();
        assert_eq!(index.cik_for_ticker("aapl"), index.cik_for_ticker("AAPL"));
        assert_eq!(
            index.cik_for_name("aPpLe iNc."),
            index.cik_for_name("Apple Inc.")
        );
    }

    #[test]
    fn lookup_miss_returns_none() {
        let index = sample_index();
        assert!(index.cik_for_name("Nonexistent Company Zzz").is_none());
        assert!(index.cik_for_ticker("ZZZZ").is_none());
    }

    #[test]
    fn search_returns_only_matching_names() {
        let index = sample_index();
        let results = index.search("bank");
        assert_eq!(results.len(), 2);
        for name in results {
            assert!(name.to_lowercase().contains("bank"));
        }
        assert!(index.search("pineapple").is_empty());
    }

    #[test]
    fn builds_from_snapshot_json() {
        let json = br#"{
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": "789019", "ticker": "MSFT", "title": "Microsoft Corp"}
        }"#;
        let index = CompanyIndex::from_snapshot_json(json).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.cik_for_ticker("msft").unwrap().as_str(), "789019");
        assert_eq!(index.cik_for_ticker("AAPL").unwrap().as_str(), "320193");
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let json = br#"{
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"ticker": "XXXX", "title": "Missing Cik Co"},
            "2": {"cik_str": 1, "ticker": "", "title": "Empty Ticker Co"},
            "3": "not even an object"
        }"#;
        let index = CompanyIndex::from_snapshot_json(json).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.cik_for_ticker("AAPL").is_some());
    }

    #[test]
    fn empty_identifier_record_is_skipped() {
        let json = br#"{
            "0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."},
            "1": {"cik_str": "", "ticker": "GHST", "title": "Ghost Co"},
            "2": {"cik_str": "   ", "ticker": "BLNK", "title": "Blank Co"}
        }"#;
        let index = CompanyIndex::from_snapshot_json(json).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.cik_for_ticker("GHST").is_none());
        assert!(index.cik_for_ticker("BLNK").is_none());
        assert!(index.cik_for_name("Ghost Co").is_none());
    }

    #[test]
    fn snapshot_must_be_a_json_map() {
        let err = CompanyIndex::from_snapshot_json(b"[1, 2, 3]").unwrap_err();
        assert_eq!(err.code(), "fetch_failed");
    }

    #[test]
    fn duplicate_keys_are_last_write_wins() {
        let index = CompanyIndex::from_records([
            CompanyRecord::new("1", "Acme Corp", "ACME"),
            CompanyRecord::new("2", "Acme Corp", "ACME"),
        ]);
        assert_eq!(index.cik_for_ticker("ACME").unwrap().as_str(), "2");
        assert_eq!(index.len(), 1);
    }
}
