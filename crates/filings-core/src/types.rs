//! Core data types for SEC filing resolution.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Cik`] - SEC Central Index Key
//! - [`Quarter`] - calendar quarter (Q1-Q4)
//! - [`FormType`] - filing form type (10-K, 10-Q)
//! - [`CompanyRecord`] - one entry from the company snapshot feed
//! - [`SubmissionHistory`] - parallel-array filing history
//! - [`FilingCandidate`] - borrowed row view over a history
//! - [`FilingAddress`] - canonical document locator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL for filing documents in the EDGAR archives.
pub const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// A SEC Central Index Key (CIK).
///
/// CIKs are numeric but treated as opaque text. The same value has two
/// canonical renderings used in different contexts: a zero-padded 10-digit
/// form ([`padded`](Self::padded)) used as a submissions lookup key, and a
/// minimal decimal form ([`unpadded`](Self::unpadded)) embedded in archive
/// document URLs. The two must not be conflated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a new CIK from a string, trimming surrounding whitespace.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_string())
    }

    /// Returns the CIK as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the zero-padded 10-digit form used as a submissions key.
    ///
    /// Padding is idempotent: padding an already 10-digit CIK returns it
    /// unchanged.
    #[must_use]
    pub fn padded(&self) -> String {
        format!("{:0>10}", self.0)
    }

    /// Returns the minimal decimal form with leading zeros stripped, as
    /// embedded in archive document URLs.
    #[must_use]
    pub fn unpadded(&self) -> &str {
        let stripped = self.0.trim_start_matches('0');
        if stripped.is_empty() { "0" } else { stripped }
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cik {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Cik {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Cik {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<u64> for Cik {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A calendar quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

impl Quarter {
    /// Converts a quarter number (1-4) into a `Quarter`.
    #[must_use]
    pub const fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Extracts the quarter number from a label such as `"Q1"`, `"q3"`, or
    /// `"2"`, without range-checking it.
    ///
    /// Out-of-range numbers are passed through so callers validating via
    /// [`from_number`](Self::from_number) report the number that was asked
    /// for rather than a generic parse failure.
    #[must_use]
    pub fn number_from_label(label: &str) -> Option<u32> {
        label.trim().trim_start_matches(['Q', 'q']).parse().ok()
    }

    /// Returns the quarter number (1-4).
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Returns the inclusive calendar month block for this quarter.
    #[must_use]
    pub const fn months(self) -> (u32, u32) {
        match self {
            Self::Q1 => (1, 3),
            Self::Q2 => (4, 6),
            Self::Q3 => (7, 9),
            Self::Q4 => (10, 12),
        }
    }

    /// Returns true if the given calendar month (1-12) falls in this quarter.
    #[must_use]
    pub const fn contains_month(self, month: u32) -> bool {
        let (start, end) = self.months();
        month >= start && month <= end
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// SEC filing form types handled by the resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Annual report (10-K).
    AnnualReport,
    /// Quarterly report (10-Q).
    QuarterlyReport,
}

impl FormType {
    /// Returns the form type string as it appears in the submissions feed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnnualReport => "10-K",
            Self::QuarterlyReport => "10-Q",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One company entry from the bulk snapshot feed.
///
/// Records are loaded wholesale at index-build time and never mutated; a
/// refresh discards and rebuilds the whole set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// The company's CIK.
    pub cik: Cik,
    /// Display name as published in the snapshot.
    pub name: String,
    /// Ticker symbol.
    pub ticker: String,
}

impl CompanyRecord {
    /// Creates a new company record.
    #[must_use]
    pub fn new(cik: impl Into<Cik>, name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            cik: cik.into(),
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// A reference to an overflow page of submission history.
///
/// The submissions feed keeps only the most recent filings inline and pages
/// the rest out into independently fetchable fragments named here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowPage {
    /// File name of the fragment, relative to the submissions endpoint.
    pub name: String,
}

impl OverflowPage {
    /// Creates a new overflow page reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The set of known filings for one CIK, as four parallel ordered sequences.
///
/// Row `i` is defined by having the same index across all four sequences.
/// This shape deliberately mirrors the upstream feed; the feed lists filings
/// newest-first and that ordering is inherited, never re-sorted here. A
/// history may reference overflow pages holding older rows in the same shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionHistory {
    /// Form type per row (e.g. "10-K").
    pub forms: Vec<String>,
    /// ISO 8601 filing date per row.
    pub filing_dates: Vec<String>,
    /// Accession number per row, hyphenated as published.
    pub accession_numbers: Vec<String>,
    /// Primary document file name per row.
    pub primary_documents: Vec<String>,
    /// Overflow pages holding older rows, if any.
    pub overflow: Vec<OverflowPage>,
}

impl SubmissionHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete rows.
    ///
    /// The sequences should be equal length; if the upstream feed delivers
    /// ragged arrays, iteration is clamped to the shortest one so a partial
    /// row is never produced.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.forms
            .len()
            .min(self.filing_dates.len())
            .min(self.accession_numbers.len())
            .min(self.primary_documents.len())
    }

    /// Returns true if there are no complete rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Iterates over complete rows as borrowed [`FilingCandidate`] views.
    pub fn rows(&self) -> impl Iterator<Item = FilingCandidate<'_>> {
        (0..self.row_count()).map(|i| FilingCandidate {
            form: &self.forms[i],
            filing_date: &self.filing_dates[i],
            accession_number: &self.accession_numbers[i],
            primary_document: &self.primary_documents[i],
        })
    }

    /// Appends one row to all four sequences.
    pub fn push_row(
        &mut self,
        form: impl Into<String>,
        filing_date: impl Into<String>,
        accession_number: impl Into<String>,
        primary_document: impl Into<String>,
    ) {
        self.forms.push(form.into());
        self.filing_dates.push(filing_date.into());
        self.accession_numbers.push(accession_number.into());
        self.primary_documents.push(primary_document.into());
    }
}

/// A borrowed view of one row of a [`SubmissionHistory`].
///
/// Produced transiently while scanning; never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilingCandidate<'a> {
    /// Form type (e.g. "10-K").
    pub form: &'a str,
    /// ISO 8601 filing date.
    pub filing_date: &'a str,
    /// Accession number, hyphenated as published.
    pub accession_number: &'a str,
    /// Primary document file name.
    pub primary_document: &'a str,
}

/// Canonical locator for one filing document.
///
/// Construction normalizes its parts: hyphens are stripped from the
/// accession number and the document name is trimmed of whitespace and stray
/// trailing slash or backslash characters. The rendered URL embeds the CIK in
/// its minimal decimal form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingAddress {
    cik: Cik,
    accession_number: String,
    primary_document: String,
}

impl FilingAddress {
    /// Builds an address from raw feed values, normalizing each part.
    #[must_use]
    pub fn new(cik: Cik, accession_number: &str, primary_document: &str) -> Self {
        Self {
            cik,
            accession_number: accession_number.replace('-', ""),
            primary_document: primary_document
                .trim()
                .trim_end_matches(['/', '\\'])
                .to_string(),
        }
    }

    /// The CIK this address belongs to.
    #[must_use]
    pub fn cik(&self) -> &Cik {
        &self.cik
    }

    /// The accession number with hyphens stripped.
    #[must_use]
    pub fn accession_number(&self) -> &str {
        &self.accession_number
    }

    /// The trimmed primary document file name.
    #[must_use]
    pub fn primary_document(&self) -> &str {
        &self.primary_document
    }

    /// Renders the canonical document URL.
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            ARCHIVES_BASE_URL,
            self.cik.unpadded(),
            self.accession_number,
            self.primary_document
        )
    }
}

impl fmt::Display for FilingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cik_padding() {
        let cik = Cik::new("123456");
        assert_eq!(cik.padded(), "0000123456");
        assert_eq!(cik.padded().len(), 10);
    }

    #[test]
    fn cik_padding_is_idempotent() {
        let cik = Cik::new("0000320193");
        assert_eq!(cik.padded(), "0000320193");
    }

    #[test]
    fn cik_unpadded_strips_leading_zeros() {
        assert_eq!(Cik::new("0000320193").unpadded(), "320193");
        assert_eq!(Cik::new("320193").unpadded(), "320193");
        assert_eq!(Cik::new("0000000000").unpadded(), "0");
    }

    #[test]
    fn cik_trims_whitespace() {
        assert_eq!(Cik::new(" 320193 ").as_str(), "320193");
    }

    #[test]
    fn quarter_from_number() {
        assert_eq!(Quarter::from_number(1), Some(Quarter::Q1));
        assert_eq!(Quarter::from_number(4), Some(Quarter::Q4));
        assert_eq!(Quarter::from_number(0), None);
        assert_eq!(Quarter::from_number(5), None);
    }

    #[test]
    fn quarter_number_from_label() {
        assert_eq!(Quarter::number_from_label("Q1"), Some(1));
        assert_eq!(Quarter::number_from_label("q3"), Some(3));
        assert_eq!(Quarter::number_from_label("2"), Some(2));
        // out of range passes through for the caller's range check
        assert_eq!(Quarter::number_from_label("Q5"), Some(5));
        assert_eq!(Quarter::number_from_label("first"), None);
    }

    #[test]
    fn quarter_month_blocks() {
        assert!(Quarter::Q1.contains_month(1));
        assert!(Quarter::Q1.contains_month(3));
        assert!(!Quarter::Q1.contains_month(4));
        assert!(Quarter::Q2.contains_month(5));
        assert!(Quarter::Q3.contains_month(9));
        assert!(Quarter::Q4.contains_month(12));
        assert!(!Quarter::Q4.contains_month(1));
    }

    #[test]
    fn form_type_strings() {
        assert_eq!(FormType::AnnualReport.as_str(), "10-K");
        assert_eq!(FormType::QuarterlyReport.as_str(), "10-Q");
    }

    #[test]
    fn history_rows_clamp_to_shortest_sequence() {
        let mut history = SubmissionHistory::new();
        history.push_row("10-K", "2022-10-27", "0000320193-22-000108", "aapl-10k.htm");
        history.forms.push("10-Q".to_string());
        // ragged: one extra form without the other three columns
        assert_eq!(history.row_count(), 1);
        assert_eq!(history.rows().count(), 1);
    }

    #[test]
    fn address_url_is_bit_exact() {
        let address = FilingAddress::new(
            Cik::new("0000320193"),
            "0000320193-22-000108",
            "aapl-20220924.htm",
        );
        assert_eq!(
            address.url(),
            "https://www.sec.gov/Archives/edgar/data/320193/000032019322000108/aapl-20220924.htm"
        );
    }

    #[test]
    fn address_normalizes_document_name() {
        let address = FilingAddress::new(Cik::new("320193"), "0001-2-3", " doc.htm/\\ ");
        assert_eq!(address.accession_number(), "000123");
        assert_eq!(address.primary_document(), "doc.htm");
    }
}
