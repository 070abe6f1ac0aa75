//! HTTP transport for App Store Connect API communication.
//!
//! This module provides the [`HttpClient`] type, which sends one request at
//! a time, attaches a fresh bearer credential and classifies the response
//! into a [`DecodedResponse`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::clients::errors::HttpError;
use crate::clients::http_request::{is_absolute_url, HttpMethod, HttpRequest};
use crate::clients::http_response::DecodedResponse;
use crate::config::BaseUrl;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the App Store Connect API.
///
/// The client handles:
/// - Resolving base-relative paths against the configured base URL
/// - Default headers including User-Agent and `Accept: application/json`
/// - The `Authorization: Bearer` header, minted per request
/// - Response classification by content type
///
/// Requests are never retried; every failure goes straight back to the
/// caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use appstoreconnect::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(config.base_url(), token_provider, None)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/v1/apps").build()?;
/// let response = client.send(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URL without trailing slash.
    base_url: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Source of bearer credentials.
    token_provider: Arc<dyn TokenProvider>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root that relative request paths are joined to
    /// * `token_provider` - Supplies the bearer token for each request
    /// * `user_agent_prefix` - Optional text placed before the library's own
    ///   User-Agent
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (for example, TLS initialization failure).
    pub fn new(
        base_url: &BaseUrl,
        token_provider: Arc<dyn TokenProvider>,
        user_agent_prefix: Option<&str>,
    ) -> Result<Self, HttpError> {
        let user_agent_prefix =
            user_agent_prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}App Store Connect API Library v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: base_url.as_ref().to_string(),
            default_headers,
            token_provider,
        })
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Resolves a request URL against the base URL.
    ///
    /// Absolute URLs (pagination and relationship links) are used as-is.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> String {
        if is_absolute_url(url) {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    /// Sends an HTTP request to the App Store Connect API.
    ///
    /// This method handles:
    /// - Request validation
    /// - URL resolution
    /// - Header merging, with `Content-Type: application/json` only when a
    ///   body is present
    /// - Response classification
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - No bearer token can be produced (`Auth`)
    /// - A network error occurs (`Network`)
    /// - The service reports an error or a non-2xx status (`Api`)
    /// - The body cannot be decoded (`Decode`)
    pub async fn send(&self, request: HttpRequest) -> Result<DecodedResponse, HttpError> {
        request.verify()?;

        let url = self.resolve_url(&request.url);
        let token = self.token_provider.bearer_token()?;

        let mut headers = self.default_headers.clone();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.to_string());
        }

        tracing::debug!(method = %request.http_method, %url, "Sending request");

        let res = req_builder.send().await?;
        let status = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        tracing::debug!(method = %request.http_method, %url, status, "Received response");

        DecodedResponse::decode(status, res_headers, body)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;

    #[derive(Debug)]
    struct StaticToken;

    impl TokenProvider for StaticToken {
        fn bearer_token(&self) -> Result<String, AuthError> {
            Ok("static-token".to_string())
        }
    }

    fn create_test_client(prefix: Option<&str>) -> HttpClient {
        HttpClient::new(&BaseUrl::default(), Arc::new(StaticToken), prefix).unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = create_test_client(None);

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("App Store Connect API Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = create_test_client(Some("MyApp/1.0"));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
        assert!(user_agent.contains("App Store Connect API Library"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = create_test_client(None);

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_resolve_url_joins_relative_paths() {
        let client = create_test_client(None);

        assert_eq!(
            client.resolve_url("/v1/apps"),
            "https://api.appstoreconnect.apple.com/v1/apps"
        );
        assert_eq!(
            client.resolve_url("v1/apps"),
            "https://api.appstoreconnect.apple.com/v1/apps"
        );
    }

    #[test]
    fn test_resolve_url_keeps_absolute_links() {
        let client = create_test_client(None);
        let next = "https://api.appstoreconnect.apple.com/v1/apps?cursor=Mg.AQ";

        assert_eq!(client.resolve_url(next), next);
        assert_eq!(
            client.resolve_url("http://127.0.0.1:8080/v1/apps/1/builds"),
            "http://127.0.0.1:8080/v1/apps/1/builds"
        );
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
