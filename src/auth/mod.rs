//! Authentication for App Store Connect API calls.
//!
//! Every request carries a bearer JWT signed with the team's API key. This
//! module provides:
//!
//! - [`TokenProvider`]: The capability the HTTP client asks for a credential
//! - [`JwtTokenProvider`]: ES256 signing with token caching and refresh
//! - [`Claims`]: The claims placed in each token
//! - [`AuthError`]: Failures loading key material or signing
//!
//! # Example
//!
//! ```rust,ignore
//! use appstoreconnect::auth::{JwtTokenProvider, TokenProvider};
//! use appstoreconnect::{IssuerId, KeyId, PrivateKey};
//!
//! let provider = JwtTokenProvider::new(
//!     KeyId::new("2X9R4HXF34")?,
//!     IssuerId::new("57246542-96fe-1a63-e053-0824d011072a")?,
//!     &PrivateKey::from_file("AuthKey_2X9R4HXF34.p8")?,
//! )?;
//!
//! let token = provider.bearer_token()?;
//! ```

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{Claims, JwtTokenProvider, TokenProvider};
