//! Sales and finance report downloads.
//!
//! Reports are not JSON:API resources: the endpoints answer with
//! tab-separated text, normally gzip-compressed. Required filters that the
//! caller leaves out are filled with defaults before the request is sent:
//!
//! | Report  | Defaults                                                                   |
//! |---------|----------------------------------------------------------------------------|
//! | finance | `regionCode=ZZ`, `reportType=FINANCIAL`                                    |
//! | sales   | `frequency=DAILY`, `reportSubType=SUMMARY`, `reportType=SALES`, `version=1_0` |
//!
//! `vendorNumber` and `reportDate` have no defaults and must be supplied.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::Filters;
//!
//! let report = client
//!     .download_sales_report(Filters::new().with("vendorNumber", "85012345").with("reportDate", "2026-09-30"))
//!     .await?;
//!
//! for row in report.records() {
//!     println!("{row:?}");
//! }
//! ```

use crate::clients::{AppStoreConnectClient, DecodedResponse, HttpError, HttpMethod, HttpRequest};
use crate::rest::{build_url, Filters};

/// Finance report endpoint.
pub const FINANCE_REPORTS_ENDPOINT: &str = "/v1/financeReports";

/// Sales and trends report endpoint.
pub const SALES_REPORTS_ENDPOINT: &str = "/v1/salesReports";

/// Default filters for finance reports.
pub const FINANCE_REPORT_DEFAULTS: &[(&str, &str)] =
    &[("regionCode", "ZZ"), ("reportType", "FINANCIAL")];

/// Default filters for sales reports.
pub const SALES_REPORT_DEFAULTS: &[(&str, &str)] = &[
    ("frequency", "DAILY"),
    ("reportSubType", "SUMMARY"),
    ("reportType", "SALES"),
    ("version", "1_0"),
];

const GZIP_ACCEPT: &str = "application/a-gzip";

/// The text of a downloaded report.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    text: String,
}

impl Report {
    /// Wraps report text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the raw text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the report and returns the raw text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Splits the text into rows of tab-separated fields.
    ///
    /// Blank lines are skipped and a trailing `\r` is removed from each line.
    ///
    /// # Example
    ///
    /// ```rust
    /// use appstoreconnect::reports::Report;
    ///
    /// let report = Report::new("Provider\tSKU\r\nAPPLE\tEX1\n\n");
    /// let rows: Vec<Vec<&str>> = report.rows().collect();
    /// assert_eq!(rows, vec![vec!["Provider", "SKU"], vec!["APPLE", "EX1"]]);
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> {
        self.text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split('\t').collect())
    }

    /// Returns the header row, if any.
    #[must_use]
    pub fn header(&self) -> Option<Vec<&str>> {
        self.rows().next()
    }

    /// Returns every row after the header.
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> {
        self.rows().skip(1)
    }
}

/// Fills in the filters a report type requires when they are absent.
#[must_use]
pub fn with_defaults(mut filters: Filters, defaults: &[(&str, &str)]) -> Filters {
    for &(key, value) in defaults {
        filters.insert_default(key, value);
    }
    filters
}

impl AppStoreConnectClient {
    /// Downloads a finance report.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the answer is JSON
    /// rather than report text.
    pub async fn download_finance_report(&self, filters: Filters) -> Result<Report, HttpError> {
        self.download_report(FINANCE_REPORTS_ENDPOINT, filters, FINANCE_REPORT_DEFAULTS)
            .await
    }

    /// Downloads a sales and trends report.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails or the answer is JSON
    /// rather than report text.
    pub async fn download_sales_report(&self, filters: Filters) -> Result<Report, HttpError> {
        self.download_report(SALES_REPORTS_ENDPOINT, filters, SALES_REPORT_DEFAULTS)
            .await
    }

    async fn download_report(
        &self,
        endpoint: &str,
        filters: Filters,
        defaults: &[(&str, &str)],
    ) -> Result<Report, HttpError> {
        let filters = with_defaults(filters, defaults);
        let url = build_url(endpoint, Some(&filters), None);
        tracing::debug!(%url, "Downloading report");

        let request = HttpRequest::builder(HttpMethod::Get, url)
            .header("Accept", GZIP_ACCEPT)
            .build()?;

        match self.send(request).await? {
            DecodedResponse::Text(text) => Ok(Report::new(text)),
            DecodedResponse::Raw(raw) => Ok(Report::new(raw.text())),
            other @ DecodedResponse::Json(_) => Err(HttpError::UnexpectedContent {
                expected: "report text",
                received: other.kind().as_str(),
            }),
        }
    }
}
