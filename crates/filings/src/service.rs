//! Request/response surface for externally-triggered filing lookups.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use filings_core::{FilingError, FormType, Quarter, Result, SnapshotSource};
use filings_edgar::{EdgarClient, FilingResolver};
use filings_index::CompanyIndex;

/// Which kind of disclosure document a request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    /// Annual report (10-K).
    Annual,
    /// Quarterly report (10-Q).
    Quarter,
}

/// Year as callers send it: a number or a numeric string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum YearField {
    Number(i32),
    Text(String),
}

impl YearField {
    fn as_year(&self) -> Option<i32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Quarter as callers send it: a number, `"2"`, or a label like `"Q2"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum QuarterField {
    Number(u32),
    Text(String),
}

impl QuarterField {
    /// Parses to a quarter number without range-checking it; range
    /// validation is the resolver's job so out-of-range values get the
    /// standard `invalid_quarter` outcome.
    fn as_quarter_number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => Quarter::number_from_label(s),
        }
    }
}

/// One externally-triggered filing lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilingRequest {
    /// Annual or Quarter.
    pub request_type: RequestType,
    /// Ticker symbol or company name; tickers are tried first.
    pub company: String,
    /// Filing year.
    year: YearField,
    /// Quarter, required for Quarter requests. Accepts `1` or `"Q1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quarter: Option<QuarterField>,
}

impl FilingRequest {
    /// Builds an annual (10-K) request.
    #[must_use]
    pub fn annual(company: impl Into<String>, year: i32) -> Self {
        Self {
            request_type: RequestType::Annual,
            company: company.into(),
            year: YearField::Number(year),
            quarter: None,
        }
    }

    /// Builds a quarterly (10-Q) request.
    #[must_use]
    pub fn quarterly(company: impl Into<String>, year: i32, quarter: u32) -> Self {
        Self {
            request_type: RequestType::Quarter,
            company: company.into(),
            year: YearField::Number(year),
            quarter: Some(QuarterField::Number(quarter)),
        }
    }
}

/// Machine-readable error payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short stable error code (e.g. "invalid_quarter").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Outcome of one filing lookup.
///
/// `status` follows HTTP conventions: 200 success, 400 invalid input,
/// 404 not found, 500 upstream failure. Exactly one of `filing_url` and
/// `error` is populated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilingResponse {
    /// HTTP-like status code.
    pub status: u16,
    /// The company string from the request, echoed back.
    pub company: String,
    /// Resolved CIK, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cik: Option<String>,
    /// "10-K" or "10-Q", on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// The requested year, when it parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// The requested quarter, for quarterly lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u32>,
    /// Canonical document URL, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_url: Option<String>,
    /// Error payload, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl FilingResponse {
    fn failure(request: &FilingRequest, status: u16, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            company: request.company.clone(),
            cik: None,
            document_type: None,
            year: request.year.as_year(),
            quarter: None,
            filing_url: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }

    fn from_error(request: &FilingRequest, error: &FilingError) -> Self {
        Self::failure(request, error.status(), error.code(), error.to_string())
    }
}

/// Handles external filing lookup requests.
///
/// Owns a built [`CompanyIndex`] and a [`FilingResolver`]. Both are injected
/// explicitly; nothing here fetches at construction time unless
/// [`bootstrap`](Self::bootstrap) is asked to.
#[derive(Debug)]
pub struct FilingService {
    index: CompanyIndex,
    resolver: FilingResolver,
}

impl FilingService {
    /// Creates a service from an already-built index and resolver.
    #[must_use]
    pub fn new(index: CompanyIndex, resolver: FilingResolver) -> Self {
        Self { index, resolver }
    }

    /// Convenience constructor wiring up a live [`EdgarClient`]: fetches the
    /// company snapshot, builds the index, and shares the client as the
    /// resolver's submission source.
    ///
    /// # Errors
    ///
    /// Returns [`FilingError::FetchFailed`] if the snapshot cannot be
    /// fetched or parsed.
    pub async fn bootstrap(user_agent: &str) -> Result<Self> {
        let client = Arc::new(EdgarClient::new(user_agent));
        let snapshot = client.fetch_snapshot().await?;
        let index = CompanyIndex::from_snapshot_json(&snapshot)?;
        Ok(Self::new(index, FilingResolver::new(client)))
    }

    /// The company index in use.
    #[must_use]
    pub fn index(&self) -> &CompanyIndex {
        &self.index
    }

    /// Handles one request, always producing a response rather than an error.
    ///
    /// The company is resolved ticker-first, then by name. Every failure in
    /// the taxonomy maps to a status and a code+message error body; no raw
    /// error text ever stands alone.
    pub async fn handle(&self, request: &FilingRequest) -> FilingResponse {
        debug!(company = %request.company, request_type = ?request.request_type, "Handling filing request");

        let Some(year) = request.year.as_year() else {
            return FilingResponse::failure(request, 400, "invalid_year", "Year must be a number");
        };

        let Some(cik) = self
            .index
            .cik_for_ticker(&request.company)
            .or_else(|| self.index.cik_for_name(&request.company))
            .cloned()
        else {
            return FilingResponse::from_error(
                request,
                &FilingError::CompanyNotFound(request.company.clone()),
            );
        };

        let (form, quarter, outcome) = match request.request_type {
            RequestType::Annual => (
                FormType::AnnualReport,
                None,
                self.resolver.annual_filing(&cik, year).await,
            ),
            RequestType::Quarter => {
                let Some(field) = &request.quarter else {
                    return FilingResponse::failure(
                        request,
                        400,
                        "invalid_quarter",
                        "Quarter is required for quarterly requests",
                    );
                };
                let Some(number) = field.as_quarter_number() else {
                    return FilingResponse::failure(
                        request,
                        400,
                        "invalid_quarter",
                        "Invalid quarter format",
                    );
                };
                (
                    FormType::QuarterlyReport,
                    Some(number),
                    self.resolver.quarterly_filing(&cik, year, number).await,
                )
            }
        };

        match outcome {
            Ok(address) => FilingResponse {
                status: 200,
                company: request.company.clone(),
                cik: Some(cik.to_string()),
                document_type: Some(form.to_string()),
                year: Some(year),
                quarter,
                filing_url: Some(address.url()),
                error: None,
            },
            Err(e) => FilingResponse::from_error(request, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use filings_core::{
        Cik, CompanyRecord, OverflowPage, SubmissionHistory, SubmissionSource,
    };

    #[derive(Debug)]
    struct CannedSource(SubmissionHistory);

    #[async_trait]
    impl SubmissionSource for CannedSource {
        async fn fetch_history(&self, _cik: &Cik) -> Result<SubmissionHistory> {
            Ok(self.0.clone())
        }

        async fn fetch_overflow(&self, page: &OverflowPage) -> Result<SubmissionHistory> {
            Err(FilingError::FetchFailed(format!(
                "HTTP 404 fetching {}",
                page.name
            )))
        }
    }

    fn sample_service() -> FilingService {
        let index = CompanyIndex::from_records([CompanyRecord::new(
            "320193",
            "Apple Inc.",
            "AAPL",
        )]);

        let mut history = SubmissionHistory::new();
        history.push_row(
            "10-K",
            "2022-10-27",
            "0000320193-22-000108",
            "aapl-20220924.htm",
        );
        history.push_row(
            "10-Q",
            "2022-07-29",
            "0000320193-22-000070",
            "aapl-20220625.htm",
        );

        FilingService::new(
            index,
            FilingResolver::new(Arc::new(CannedSource(history))),
        )
    }

    #[tokio::test]
    async fn annual_request_succeeds_by_ticker() {
        let service = sample_service();
        let response = service.handle(&FilingRequest::annual("aapl", 2022)).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.cik.as_deref(), Some("320193"));
        assert_eq!(response.document_type.as_deref(), Some("10-K"));
        assert_eq!(
            response.filing_url.as_deref(),
            Some("https://www.sec.gov/Archives/edgar/data/320193/000032019322000108/aapl-20220924.htm")
        );
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn company_name_is_tried_after_ticker() {
        let service = sample_service();
        let response = service
            .handle(&FilingRequest::annual("Apple Inc.", 2022))
            .await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn unknown_company_is_404() {
        let service = sample_service();
        let response = service
            .handle(&FilingRequest::annual("Nonexistent Company Zzz", 2022))
            .await;

        assert_eq!(response.status, 404);
        let error = response.error.unwrap();
        assert_eq!(error.code, "company_not_found");
        assert!(response.filing_url.is_none());
    }

    #[tokio::test]
    async fn quarter_is_required_for_quarterly_requests() {
        let service = sample_service();
        let request = FilingRequest {
            request_type: RequestType::Quarter,
            company: "AAPL".to_string(),
            year: YearField::Number(2022),
            quarter: None,
        };
        let response = service.handle(&request).await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error.unwrap().code, "invalid_quarter");
    }

    #[tokio::test]
    async fn out_of_range_quarter_is_400() {
        let service = sample_service();
        let response = service
            .handle(&FilingRequest::quarterly("AAPL", 2022, 5))
            .await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error.unwrap().code, "invalid_quarter");
    }

    #[tokio::test]
    async fn out_of_range_quarter_label_is_400() {
        let service = sample_service();
        let request: FilingRequest = serde_json::from_str(
            r#"{"request_type": "Quarter", "company": "AAPL", "year": 2022, "quarter": "Q5"}"#,
        )
        .unwrap();
        let response = service.handle(&request).await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error.unwrap().code, "invalid_quarter");
    }

    #[tokio::test]
    async fn quarterly_request_resolves_by_calendar_block() {
        let service = sample_service();
        // 10-Q filed in July: Q3
        let response = service
            .handle(&FilingRequest::quarterly("AAPL", 2022, 3))
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.quarter, Some(3));
        assert_eq!(response.document_type.as_deref(), Some("10-Q"));
    }

    #[tokio::test]
    async fn no_filing_for_year_is_404() {
        let service = sample_service();
        let response = service.handle(&FilingRequest::annual("AAPL", 1990)).await;

        assert_eq!(response.status, 404);
        assert_eq!(response.error.unwrap().code, "no_matching_filing");
    }

    #[tokio::test]
    async fn request_json_accepts_string_year_and_quarter_label() {
        let service = sample_service();
        let request: FilingRequest = serde_json::from_str(
            r#"{"request_type": "Quarter", "company": "AAPL", "year": "2022", "quarter": "Q3"}"#,
        )
        .unwrap();
        let response = service.handle(&request).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.year, Some(2022));
        assert_eq!(response.quarter, Some(3));
    }

    #[tokio::test]
    async fn unparseable_year_is_400() {
        let service = sample_service();
        let request: FilingRequest = serde_json::from_str(
            r#"{"request_type": "Annual", "company": "AAPL", "year": "next year"}"#,
        )
        .unwrap();
        let response = service.handle(&request).await;

        assert_eq!(response.status, 400);
        assert_eq!(response.error.unwrap().code, "invalid_year");
    }

    #[test]
    fn success_response_serializes_without_error_field() {
        let response = FilingResponse {
            status: 200,
            company: "AAPL".to_string(),
            cik: Some("320193".to_string()),
            document_type: Some("10-K".to_string()),
            year: Some(2022),
            quarter: None,
            filing_url: Some("https://example.invalid/doc.htm".to_string()),
            error: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("error").is_none());
        assert!(value.get("quarter").is_none());
        assert_eq!(value["status"], 200);
    }
}
