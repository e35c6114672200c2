//! Filing resolution over submission histories.

use chrono::{Datelike, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use filings_core::{
    Cik, FilingAddress, FilingError, FormType, HistoryCache, Quarter, Result, SubmissionHistory,
    SubmissionSource,
};

/// Resolves a CIK plus a target period to the canonical URL of one filing.
///
/// The submission source is injected, so the resolver itself has no opinion
/// about where histories come from; tests drive it with canned data and
/// production wires in [`EdgarClient`](crate::EdgarClient). An optional
/// [`HistoryCache`] avoids refetching the primary history across calls; cache
/// failures only cost a refetch.
///
/// # Quarterly matching policy
///
/// A 10-Q matches a requested quarter when its filing date falls in that
/// quarter's calendar month block (Q1 = Jan-Mar, Q2 = Apr-Jun, Q3 = Jul-Sep,
/// Q4 = Oct-Dec). Fiscal quarters do not always line up with calendar
/// quarters; the alternate reading - "the nth most recent 10-Q of the year" -
/// is deliberately not applied, so callers get one consistent policy rather
/// than a blend.
pub struct FilingResolver {
    source: Arc<dyn SubmissionSource>,
    cache: Option<Arc<dyn HistoryCache>>,
}

impl fmt::Debug for FilingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilingResolver")
            .field("source", &self.source)
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl FilingResolver {
    /// Creates a resolver over the given submission source, with no cache.
    #[must_use]
    pub fn new(source: Arc<dyn SubmissionSource>) -> Self {
        Self {
            source,
            cache: None,
        }
    }

    /// Attaches a history cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn HistoryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Locates the 10-K filed in the given year and returns its address.
    ///
    /// The inline history is scanned first, index 0 upward; the feed lists
    /// filings newest-first, so the first match is the most recently filed
    /// 10-K of that year. Overflow pages are consulted only if the inline
    /// history has no match.
    ///
    /// # Errors
    ///
    /// [`FilingError::InvalidYear`] if `year` is outside 1900 through next
    /// year (checked before any fetch); [`FilingError::FetchFailed`] if the
    /// primary history cannot be fetched; [`FilingError::NoMatchingFiling`]
    /// if the history and all reachable overflow pages hold no match.
    pub async fn annual_filing(&self, cik: &Cik, year: i32) -> Result<FilingAddress> {
        validate_year(year)?;
        self.resolve(cik, FormType::AnnualReport, year, None).await
    }

    /// Locates the 10-Q for the given year and quarter (1-4) and returns its
    /// address, using the calendar-block policy described on
    /// [`FilingResolver`].
    ///
    /// # Errors
    ///
    /// [`FilingError::InvalidYear`] / [`FilingError::InvalidQuarter`] for bad
    /// input (checked before any fetch); otherwise as
    /// [`annual_filing`](Self::annual_filing).
    pub async fn quarterly_filing(&self, cik: &Cik, year: i32, quarter: u32) -> Result<FilingAddress> {
        validate_year(year)?;
        let quarter = Quarter::from_number(quarter).ok_or(FilingError::InvalidQuarter(quarter))?;
        self.resolve(cik, FormType::QuarterlyReport, year, Some(quarter))
            .await
    }

    async fn resolve(
        &self,
        cik: &Cik,
        form: FormType,
        year: i32,
        quarter: Option<Quarter>,
    ) -> Result<FilingAddress> {
        let history = self.load_history(cik).await?;
        let year_prefix = year.to_string();

        if let Some(address) = scan(cik, &history, form, &year_prefix, quarter) {
            return Ok(address);
        }

        // Not in the inline history; walk overflow pages one at a time. A
        // single unreachable page degrades the search, never aborts it.
        for page in &history.overflow {
            let fragment = match self.source.fetch_overflow(page).await {
                Ok(fragment) => fragment,
                Err(e) => {
                    warn!(page = %page.name, error = %e, "Skipping unreachable overflow page");
                    continue;
                }
            };
            if let Some(address) = scan(cik, &fragment, form, &year_prefix, quarter) {
                return Ok(address);
            }
        }

        Err(FilingError::NoMatchingFiling {
            form,
            year,
            quarter,
        })
    }

    async fn load_history(&self, cik: &Cik) -> Result<SubmissionHistory> {
        if let Some(cache) = &self.cache {
            match cache.get_history(cik).await {
                Ok(Some(history)) => {
                    debug!(cik = %cik, "Using cached submission history");
                    return Ok(history);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(cik = %cik, error = %e, "Cache read failed, fetching directly");
                }
            }
        }

        let history = self.source.fetch_history(cik).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put_history(cik, &history).await {
                warn!(cik = %cik, error = %e, "Failed to cache submission history");
            }
        }

        Ok(history)
    }
}

/// Scans one history fragment for the first matching row.
///
/// A row matches when its form type is the requested one and its filing date
/// starts with the year. The year check is a string-prefix comparison on the
/// ISO date, which tolerates malformed trailing characters in the date field.
/// For quarterly queries the date's month must additionally fall in the
/// requested quarter's calendar block; a row whose month cannot be parsed is
/// never a quarterly match.
fn scan(
    cik: &Cik,
    history: &SubmissionHistory,
    form: FormType,
    year_prefix: &str,
    quarter: Option<Quarter>,
) -> Option<FilingAddress> {
    for row in history.rows() {
        if row.form != form.as_str() || !row.filing_date.starts_with(year_prefix) {
            continue;
        }
        if let Some(q) = quarter {
            match filing_month(row.filing_date) {
                Some(month) if q.contains_month(month) => {}
                _ => continue,
            }
        }
        debug!(
            cik = %cik,
            form = %form,
            filing_date = row.filing_date,
            accession = row.accession_number,
            "Matched filing"
        );
        return Some(FilingAddress::new(
            cik.clone(),
            row.accession_number,
            row.primary_document,
        ));
    }
    None
}

/// Extracts the month from an ISO 8601 date string ("YYYY-MM-DD").
fn filing_month(date: &str) -> Option<u32> {
    date.get(5..7)?
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
}

/// Years accepted by the resolver: 1900 through next year, checked before
/// any fetch occurs.
fn validate_year(year: i32) -> Result<()> {
    let current_year = Utc::now().year();
    if (1900..=current_year + 1).contains(&year) {
        Ok(())
    } else {
        Err(FilingError::InvalidYear(year))
    }
}
