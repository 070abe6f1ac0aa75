//! Resource-level error types.
//!
//! This module contains the error type for resource operations: envelope
//! access, relationship navigation, pagination and CRUD. Transport failures
//! are wrapped in [`ResourceError::Http`].
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::rest::ResourceError;
//!
//! match app.navigate(&client, "betaLicenseAgreement").await {
//!     Ok(related) => println!("{related:?}"),
//!     Err(ResourceError::NotFound { url }) => println!("nothing at {url}"),
//!     Err(e) if e.status() == Some(403) => println!("not allowed: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{ApiError, HttpError};

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::rest::ResourceError;
///
/// let error = ResourceError::MissingAttribute {
///     type_name: "apps".to_string(),
///     attribute: "sku".to_string(),
/// };
/// assert_eq!(error.to_string(), "apps has no attribute sku");
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No schema is registered for a JSON:API `type`.
    #[error("Unknown resource type: {type_name}")]
    UnknownResourceType {
        /// The unregistered type string.
        type_name: String,
    },

    /// The relationship is not declared for the resource type.
    #[error("{type_name} has no relationship {relationship}")]
    UnknownRelationship {
        /// The resource type navigated from.
        type_name: String,
        /// The requested relationship name.
        relationship: String,
    },

    /// The attribute is absent from the payload.
    ///
    /// An attribute that is present with a JSON `null` value is not missing.
    #[error("{type_name} has no attribute {attribute}")]
    MissingAttribute {
        /// The resource type.
        type_name: String,
        /// The requested attribute name.
        attribute: String,
    },

    /// A single-resource fetch returned `data: null`.
    #[error("No resource found at {url}")]
    NotFound {
        /// The URL that was fetched.
        url: String,
    },

    /// The operation needs a server-assigned id and the envelope has none.
    #[error("{type_name} resource has no id")]
    MissingId {
        /// The resource type.
        type_name: String,
    },

    /// An envelope of one type was decoded as another.
    #[error("Expected a {expected} resource, received {received}")]
    TypeMismatch {
        /// The type the caller asked for.
        expected: &'static str,
        /// The type found in the payload.
        received: String,
    },

    /// A create or modify argument has the wrong shape for its key.
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument {
        /// The argument key.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A JSON:API document did not have the expected shape.
    #[error("Malformed JSON:API document: {reason}")]
    Decode {
        /// What went wrong.
        reason: String,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the service error, if the failure was reported by the server.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Http(e) => e.api_error(),
            _ => None,
        }
    }

    /// Returns the HTTP status reported by the server, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_error().and_then(|e| e.status)
    }

    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

impl From<ApiError> for ResourceError {
    fn from(error: ApiError) -> Self {
        Self::Http(HttpError::Api(error))
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}
