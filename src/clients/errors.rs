//! HTTP-specific error types.
//!
//! This module contains error types for HTTP operations, including errors
//! reported by the App Store Connect service, network failures, and request
//! validation failures.
//!
//! # Error Handling
//!
//! - [`ApiError`]: The service returned a JSON:API error document or a
//!   non-2xx status
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! No error is retried by the client. Callers decide whether and how to retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::clients::HttpError;
//!
//! match client.send(request).await {
//!     Ok(response) => println!("{response:?}"),
//!     Err(HttpError::Api(e)) => println!("API error {:?}: {}", e.status, e.detail),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;

/// Detail used when an error document carries no `detail` field.
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// An error reported by the App Store Connect service.
///
/// Built from the first entry of a JSON:API `errors` array, or from the raw
/// status and body of a non-JSON failure.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::clients::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::from_error_entry(&json!({
///     "status": "403",
///     "detail": "Forbidden"
/// }));
/// assert_eq!(error.status, Some(403));
/// assert!(error.to_string().contains("Forbidden"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{detail}{}", .status.map(|s| format!(" (status {s})")).unwrap_or_default())]
pub struct ApiError {
    /// Human-readable description of the problem.
    pub detail: String,
    /// The HTTP status, when it could be determined.
    pub status: Option<u16>,
}

impl ApiError {
    /// Creates an error from a detail message and optional status.
    #[must_use]
    pub fn new(detail: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            detail: detail.into(),
            status,
        }
    }

    /// Builds an error from one entry of a JSON:API `errors` array.
    ///
    /// `detail` defaults to [`UNKNOWN_ERROR_DETAIL`]; `status` is accepted as a
    /// string (the JSON:API form) or a number and left unset otherwise.
    #[must_use]
    pub fn from_error_entry(entry: &serde_json::Value) -> Self {
        let detail = entry
            .get("detail")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_DETAIL);

        let status = entry.get("status").and_then(|status| match status {
            serde_json::Value::String(s) => s.trim().parse::<u16>().ok(),
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            _ => None,
        });

        Self::new(detail, status)
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request URL is empty.
    #[error("Cannot send a request without a URL.")]
    EmptyUrl,
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The service reported an error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A bearer token could not be produced.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded (malformed JSON, gzip or UTF-8).
    #[error("Failed to decode response body: {reason}")]
    Decode {
        /// What went wrong.
        reason: String,
    },

    /// The response had a different content type than the caller needed.
    #[error("Expected {expected} response, received {received}")]
    UnexpectedContent {
        /// The kind of payload that was expected.
        expected: &'static str,
        /// The kind of payload that was received.
        received: &'static str,
    },
}

impl HttpError {
    /// Returns the service error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_from_entry_parses_string_status() {
        let error = ApiError::from_error_entry(&json!({"status": "404", "detail": "Gone"}));
        assert_eq!(error.status, Some(404));
        assert_eq!(error.detail, "Gone");
    }

    #[test]
    fn test_api_error_from_entry_defaults_detail() {
        let error = ApiError::from_error_entry(&json!({"status": "500"}));
        assert_eq!(error.detail, UNKNOWN_ERROR_DETAIL);
        assert_eq!(error.status, Some(500));
    }

    #[test]
    fn test_api_error_from_entry_leaves_unparseable_status_unset() {
        let error = ApiError::from_error_entry(&json!({"status": "teapot", "detail": "x"}));
        assert!(error.status.is_none());
        assert_eq!(error.to_string(), "x");
    }

    #[test]
    fn test_api_error_display_includes_status() {
        let error = ApiError::new("Forbidden", Some(403));
        assert_eq!(error.to_string(), "Forbidden (status 403)");
    }

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "PATCH".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use PATCH without specifying data.");
    }

    #[test]
    fn test_http_error_api_accessor() {
        let error = HttpError::from(ApiError::new("Forbidden", Some(403)));
        assert_eq!(error.api_error().and_then(|e| e.status), Some(403));

        let error = HttpError::Decode {
            reason: "bad gzip".to_string(),
        };
        assert!(error.api_error().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ApiError::new("x", None);
        let _: &dyn std::error::Error = &InvalidHttpRequestError::EmptyUrl;
    }
}
