//! Crate-level error types.
//!
//! This module contains [`ConfigError`], returned when building an
//! [`AppStoreConnectConfig`](crate::AppStoreConnectConfig) or one of its
//! validated newtypes, and [`Error`], which unifies the error types of every
//! layer for callers that do not need to tell them apart.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use appstoreconnect::{ConfigError, KeyId};
//!
//! let result = KeyId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyKeyId)));
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::HttpError;
use crate::rest::ResourceError;

/// Errors that can occur while configuring the client.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API key identifier cannot be empty.
    #[error("Key ID cannot be empty. Please provide the identifier of your App Store Connect API key.")]
    EmptyKeyId,

    /// The issuer identifier cannot be empty.
    #[error("Issuer ID cannot be empty. Please provide the issuer ID shown in App Store Connect.")]
    EmptyIssuerId,

    /// The private key material cannot be empty.
    #[error("Private key cannot be empty. Please provide the contents of your .p8 key file.")]
    EmptyPrivateKey,

    /// The base URL is not an absolute http(s) URL.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme (e.g., 'https://api.appstoreconnect.apple.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Any error produced by this crate.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::{ConfigError, Error, KeyId};
///
/// fn key_id() -> Result<KeyId, Error> {
///     Ok(KeyId::new("")?)
/// }
/// assert!(matches!(key_id(), Err(Error::Config(ConfigError::EmptyKeyId))));
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Key material or token signing failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport or service failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Resource access, navigation or CRUD failure.
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl Error {
    /// Returns the HTTP status reported by the server, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.api_error().and_then(|api| api.status),
            Self::Resource(e) => e.status(),
            Self::Config(_) | Self::Auth(_) => None,
        }
    }
}
