//! Error types for claim decoding and verification.

use thiserror::Error;

/// Result type alias for verification operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors returned by decoding and verification.
///
/// The two kinds are kept apart so that a broken link is never reported as
/// a forged one and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The supplied signature is absent, empty or does not match.
    #[error("Signature invalid")]
    SignatureInvalid,

    /// The raw input could not be parsed into a field set.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl AuthError {
    /// Whether this error rejects the signature (as opposed to the input).
    pub fn is_signature_invalid(&self) -> bool {
        matches!(self, Self::SignatureInvalid)
    }
}

impl From<loginwidget_crypto::CryptoError> for AuthError {
    fn from(err: loginwidget_crypto::CryptoError) -> Self {
        match err {
            loginwidget_crypto::CryptoError::SignatureMismatch => Self::SignatureInvalid,
        }
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        Self::MalformedInput(format!("invalid URI: {err}"))
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(format!("invalid JSON payload: {err}"))
    }
}
