//! HTTP response classification.
//!
//! App Store Connect answers with one of three kinds of payload, chosen by
//! the response's `Content-Type`:
//!
//! - JSON (`application/json`, `application/vnd.api+json`): decoded into a
//!   [`serde_json::Value`]; a JSON:API `errors` array becomes an [`ApiError`]
//! - gzip-compressed text (`application/a-gzip` and friends): decompressed
//!   and decoded as UTF-8, used by report downloads
//! - anything else: returned as a [`RawResponse`] when the status is 2xx,
//!   otherwise turned into an [`ApiError`] carrying the raw body

use std::collections::HashMap;
use std::io::Read;

use flate2::read::GzDecoder;

use crate::clients::errors::{ApiError, HttpError, UNKNOWN_ERROR_DETAIL};

/// The JSON:API media type.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Media types treated as gzip-compressed text.
pub const GZIP_MEDIA_TYPES: &[&str] = &["application/a-gzip", "application/gzip", "application/x-gzip"];

/// The broad kind of a response body, derived from its `Content-Type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    /// A JSON or JSON:API document.
    Json,
    /// Gzip-compressed text.
    Gzip,
    /// Any other (or a missing) content type.
    Raw,
}

impl ContentKind {
    /// Classifies a `Content-Type` header value.
    ///
    /// Parameters such as `; charset=utf-8` are ignored and the comparison is
    /// case-insensitive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use appstoreconnect::clients::ContentKind;
    ///
    /// assert_eq!(ContentKind::from_content_type(Some("application/json; charset=utf-8")), ContentKind::Json);
    /// assert_eq!(ContentKind::from_content_type(Some("application/a-gzip")), ContentKind::Gzip);
    /// assert_eq!(ContentKind::from_content_type(None), ContentKind::Raw);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(content_type) = content_type else {
            return Self::Raw;
        };
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if media_type == "application/json" || media_type == JSON_API_MEDIA_TYPE {
            Self::Json
        } else if GZIP_MEDIA_TYPES.contains(&media_type.as_str()) {
            Self::Gzip
        } else {
            Self::Raw
        }
    }

    /// Returns a short name for error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Gzip => "gzip text",
            Self::Raw => "raw",
        }
    }
}

/// A response that was neither JSON nor gzip-compressed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, lower-cased, possibly multi-valued.
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A successfully decoded response.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedResponse {
    /// A JSON document without errors.
    Json(serde_json::Value),
    /// Text decompressed from a gzip body.
    Text(String),
    /// A raw 2xx response.
    Raw(RawResponse),
}

impl DecodedResponse {
    /// Decodes a response according to its content type.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Api`] if a JSON body carries an `errors` array, or the
    ///   status is outside `200..=299`
    /// - [`HttpError::Decode`] if JSON, gzip or UTF-8 decoding fails
    pub fn decode(
        status: u16,
        headers: HashMap<String, Vec<String>>,
        body: Vec<u8>,
    ) -> Result<Self, HttpError> {
        let content_type = headers
            .get("content-type")
            .and_then(|values| values.first())
            .map(String::as_str);
        let is_success = (200..=299).contains(&status);

        match ContentKind::from_content_type(content_type) {
            ContentKind::Json => {
                let value = if body.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_slice(&body).map_err(|e| HttpError::Decode {
                        reason: format!("invalid JSON: {e}"),
                    })?
                };

                if let Some(first) = value
                    .get("errors")
                    .and_then(serde_json::Value::as_array)
                    .and_then(|errors| errors.first())
                {
                    return Err(ApiError::from_error_entry(first).into());
                }

                if !is_success {
                    return Err(ApiError::new(UNKNOWN_ERROR_DETAIL, Some(status)).into());
                }

                Ok(Self::Json(value))
            }
            ContentKind::Gzip => {
                if !is_success {
                    return Err(
                        ApiError::new(String::from_utf8_lossy(&body), Some(status)).into(),
                    );
                }

                let mut text = String::new();
                GzDecoder::new(body.as_slice())
                    .read_to_string(&mut text)
                    .map_err(|e| HttpError::Decode {
                        reason: format!("invalid gzip text: {e}"),
                    })?;
                Ok(Self::Text(text))
            }
            ContentKind::Raw => {
                if !is_success {
                    return Err(
                        ApiError::new(String::from_utf8_lossy(&body), Some(status)).into(),
                    );
                }

                Ok(Self::Raw(RawResponse {
                    status,
                    headers,
                    body,
                }))
            }
        }
    }

    /// Returns the kind of payload held.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Json(_) => ContentKind::Json,
            Self::Text(_) => ContentKind::Gzip,
            Self::Raw(_) => ContentKind::Raw,
        }
    }

    /// Unwraps a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::UnexpectedContent`] for text or raw payloads.
    pub fn into_json(self) -> Result<serde_json::Value, HttpError> {
        match self {
            Self::Json(value) => Ok(value),
            other => Err(HttpError::UnexpectedContent {
                expected: ContentKind::Json.as_str(),
                received: other.kind().as_str(),
            }),
        }
    }
}
