//! Authentication error types.

use thiserror::Error;

/// Errors raised while loading key material or minting a bearer token.
///
/// These errors are fatal for the client: they are surfaced immediately and
/// never retried.
///
/// # Example
///
/// ```rust
/// use appstoreconnect::AuthError;
///
/// let error = AuthError::InvalidKey {
///     reason: "InvalidKeyFormat".to_string(),
/// };
/// assert!(error.to_string().contains("InvalidKeyFormat"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The private key file could not be read.
    #[error("Unable to read private key from '{path}': {reason}")]
    KeyUnreadable {
        /// The path that was read.
        path: String,
        /// Why the read failed.
        reason: String,
    },

    /// The private key is not a valid PKCS#8 EC key.
    #[error("Invalid private key: {reason}. Expected the PEM contents of an App Store Connect .p8 key.")]
    InvalidKey {
        /// The parser's description of the problem.
        reason: String,
    },

    /// Signing the token failed.
    #[error("Failed to sign bearer token: {reason}")]
    Signing {
        /// The signer's description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_unreadable_message_includes_path() {
        let error = AuthError::KeyUnreadable {
            path: "/keys/AuthKey_ABC.p8".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/keys/AuthKey_ABC.p8"));
        assert!(message.contains("No such file"));
    }

    #[test]
    fn test_signing_error_message() {
        let error = AuthError::Signing {
            reason: "bad".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to sign bearer token: bad");
    }
}
