//! HTTP client types for App Store Connect communication.
//!
//! This module provides the transport layer: authenticated requests,
//! classification of responses by content type, and the top-level
//! [`AppStoreConnectClient`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AppStoreConnectClient`]: The entry point; raw calls, resource
//!   operations and report downloads
//! - [`HttpClient`]: The async HTTP client that signs and sends requests
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`DecodedResponse`]: A response decoded according to its content type
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: Everything that can go wrong on the wire
//!
//! # Response Handling
//!
//! | Content type                                   | Result                               |
//! |------------------------------------------------|--------------------------------------|
//! | `application/json`, `application/vnd.api+json` | [`DecodedResponse::Json`], or an [`ApiError`] from the `errors` array |
//! | `application/a-gzip`, `application/gzip`, `application/x-gzip` | [`DecodedResponse::Text`] after decompression |
//! | anything else                                  | [`DecodedResponse::Raw`], or an [`ApiError`] for non-2xx statuses |
//!
//! Requests are never retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::clients::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/v1/apps?limit=1").build()?;
//! let response = client.send(request).await?;
//! println!("{:?}", response.into_json()?);
//! ```

mod client;
mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use client::AppStoreConnectClient;
pub use errors::{ApiError, HttpError, InvalidHttpRequestError, UNKNOWN_ERROR_DETAIL};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{
    ContentKind, DecodedResponse, RawResponse, GZIP_MEDIA_TYPES, JSON_API_MEDIA_TYPE,
};
