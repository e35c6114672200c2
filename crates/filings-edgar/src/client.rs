//! Rate-limited HTTP client for the EDGAR APIs.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use filings_core::{
    Cik, FilingAddress, FilingError, OverflowPage, Result, SnapshotSource, SubmissionHistory,
    SubmissionSource,
};

/// SEC EDGAR API base URL.
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers snapshot URL.
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC requirement).
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Rate limiter to ensure we don't exceed SEC's rate limits.
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// HTTP client for the SEC EDGAR APIs.
///
/// Implements [`SnapshotSource`] for the bulk company tickers document and
/// [`SubmissionSource`] for per-CIK submission histories and their overflow
/// pages. Requests are paced to at most 10 per second and carry the
/// identifying User-Agent the SEC's fair access policy requires.
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    user_agent: String,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Example
    /// ```
    /// use filings_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("MyApp/1.0 (contact@example.com)");
    /// ```
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client, user_agent)
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured reqwest client
    /// * `user_agent` - User agent string (for identification purposes)
    #[must_use]
    pub fn with_client(client: reqwest::Client, user_agent: &str) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            user_agent: user_agent.to_string(),
        }
    }

    /// Returns the configured user agent.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Performs one rate-limited GET and returns the response on success.
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "Fetching from EDGAR");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FilingError::FetchFailed(format!("Network error for {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(FilingError::FetchFailed(format!(
                "HTTP {} fetching {url}",
                response.status()
            )));
        }

        Ok(response)
    }

    /// Downloads the raw text of a filing document.
    ///
    /// The body is returned as-is; stripping markup for downstream text
    /// consumers is their concern, not this client's.
    ///
    /// # Errors
    ///
    /// Returns [`FilingError::FetchFailed`] on transport errors or a
    /// non-success status.
    pub async fn fetch_filing_text(&self, address: &FilingAddress) -> Result<String> {
        let url = address.url();
        let response = self.get(&url).await?;
        response
            .text()
            .await
            .map_err(|e| FilingError::FetchFailed(format!("Failed to read filing body: {e}")))
    }
}

#[async_trait]
impl SnapshotSource for EdgarClient {
    async fn fetch_snapshot(&self) -> Result<Vec<u8>> {
        let response = self.get(COMPANY_TICKERS_URL).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FilingError::FetchFailed(format!("Failed to read snapshot body: {e}")))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SubmissionSource for EdgarClient {
    async fn fetch_history(&self, cik: &Cik) -> Result<SubmissionHistory> {
        let url = format!("{}/submissions/CIK{}.json", EDGAR_BASE_URL, cik.padded());
        let response = self.get(&url).await?;

        let body: SubmissionsResponse = response.json().await.map_err(|e| {
            FilingError::FetchFailed(format!("Failed to parse submissions for CIK {cik}: {e}"))
        })?;

        let history = body.into_history();
        debug!(
            cik = %cik,
            rows = history.row_count(),
            overflow_pages = history.overflow.len(),
            "Fetched submission history"
        );
        Ok(history)
    }

    async fn fetch_overflow(&self, page: &OverflowPage) -> Result<SubmissionHistory> {
        let url = format!("{}/submissions/{}", EDGAR_BASE_URL, page.name);
        let response = self.get(&url).await?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            FilingError::FetchFailed(format!("Failed to parse overflow page {}: {e}", page.name))
        })?;

        parse_overflow(body).map_err(|e| {
            warn!(page = %page.name, error = %e, "Malformed overflow page");
            e
        })
    }
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Response from the EDGAR submissions API.
#[derive(Debug, Default, Deserialize)]
struct SubmissionsResponse {
    #[serde(default)]
    filings: FilingsSection,
}

/// The `filings` section: inline recent rows plus overflow page references.
#[derive(Debug, Default, Deserialize)]
struct FilingsSection {
    #[serde(default)]
    recent: RecentFilings,
    #[serde(default)]
    files: Vec<OverflowFileInfo>,
}

/// The four parallel arrays of the submissions feed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    #[serde(default)]
    form: Vec<String>,
    #[serde(default)]
    filing_date: Vec<String>,
    #[serde(default)]
    accession_number: Vec<String>,
    #[serde(default)]
    primary_document: Vec<String>,
}

/// One entry of the `files` list naming an overflow page.
#[derive(Debug, Deserialize)]
struct OverflowFileInfo {
    name: String,
}

impl SubmissionsResponse {
    fn into_history(self) -> SubmissionHistory {
        let recent = self.filings.recent;
        SubmissionHistory {
            forms: recent.form,
            filing_dates: recent.filing_date,
            accession_numbers: recent.accession_number,
            primary_documents: recent.primary_document,
            overflow: self
                .filings
                .files
                .into_iter()
                .map(|f| OverflowPage::new(f.name))
                .collect(),
        }
    }
}

/// Parses an overflow page body.
///
/// The feed has served overflow fragments both wrapped in a `filings.recent`
/// object (matching the primary document) and as bare parallel arrays at the
/// top level; both shapes are accepted. Overflow references inside a fragment
/// are ignored - pagination is one level deep.
fn parse_overflow(body: serde_json::Value) -> Result<SubmissionHistory> {
    let wrapped = body.get("filings").is_some();
    if wrapped {
        let response: SubmissionsResponse = serde_json::from_value(body)
            .map_err(|e| FilingError::FetchFailed(format!("Bad overflow fragment: {e}")))?;
        let mut history = response.into_history();
        history.overflow.clear();
        return Ok(history);
    }

    let recent: RecentFilings = serde_json::from_value(body)
        .map_err(|e| FilingError::FetchFailed(format!("Bad overflow fragment: {e}")))?;
    Ok(SubmissionHistory {
        forms: recent.form,
        filing_dates: recent.filing_date,
        accession_numbers: recent.accession_number,
        primary_documents: recent.primary_document,
        overflow: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_carries_user_agent() {
        let client = EdgarClient::new("Test/1.0 (test@example.com)");
        assert_eq!(client.user_agent(), "Test/1.0 (test@example.com)");
    }

    #[test]
    fn submissions_response_maps_to_history() {
        let body = json!({
            "cik": 320193,
            "name": "Apple Inc.",
            "filings": {
                "recent": {
                    "form": ["10-K", "8-K"],
                    "filingDate": ["2022-10-27", "2022-11-01"],
                    "accessionNumber": ["0000320193-22-000108", "0000320193-22-000110"],
                    "primaryDocument": ["aapl-20220924.htm", "aapl-8k.htm"]
                },
                "files": [
                    {"name": "CIK0000320193-submissions-001.json", "filingCount": 900}
                ]
            }
        });
        let response: SubmissionsResponse = serde_json::from_value(body).unwrap();
        let history = response.into_history();
        assert_eq!(history.row_count(), 2);
        assert_eq!(history.forms[0], "10-K");
        assert_eq!(history.overflow.len(), 1);
        assert_eq!(history.overflow[0].name, "CIK0000320193-submissions-001.json");
    }

    #[test]
    fn missing_filings_section_yields_empty_history() {
        let response: SubmissionsResponse = serde_json::from_value(json!({"cik": 1})).unwrap();
        let history = response.into_history();
        assert!(history.is_empty());
        assert!(history.overflow.is_empty());
    }

    #[test]
    fn overflow_accepts_wrapped_shape() {
        let body = json!({
            "filings": {
                "recent": {
                    "form": ["10-Q"],
                    "filingDate": ["2015-05-01"],
                    "accessionNumber": ["0000000001-15-000001"],
                    "primaryDocument": ["old-10q.htm"]
                },
                "files": [{"name": "should-be-ignored.json"}]
            }
        });
        let history = parse_overflow(body).unwrap();
        assert_eq!(history.row_count(), 1);
        // no recursive pagination
        assert!(history.overflow.is_empty());
    }

    #[test]
    fn overflow_accepts_bare_shape() {
        let body = json!({
            "form": ["10-K"],
            "filingDate": ["2012-02-24"],
            "accessionNumber": ["0000320193-12-000006"],
            "primaryDocument": ["a10-k.htm"]
        });
        let history = parse_overflow(body).unwrap();
        assert_eq!(history.row_count(), 1);
        assert_eq!(history.filing_dates[0], "2012-02-24");
    }

    #[test]
    fn overflow_rejects_non_object_body() {
        let err = parse_overflow(json!("nope")).unwrap_err();
        assert_eq!(err.code(), "fetch_failed");
    }
}
