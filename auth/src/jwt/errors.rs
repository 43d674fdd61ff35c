use thiserror::Error;

/// Error type for token operations.
///
/// `MissingSecret` and `EncodingFailed` are signing-side faults and point at
/// configuration. The remaining variants describe why a presented token was
/// refused; callers that only need allow/deny treat them alike.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,
}
