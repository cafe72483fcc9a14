/// Reasons a presented credential is rejected.
///
/// No principal is produced alongside any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The signature does not verify under the configured key, or the token
    /// names an unsupported algorithm.
    #[error("Credential signature is invalid")]
    InvalidSignature,

    /// The expiry timestamp has passed.
    #[error("Credential has expired")]
    Expired,

    /// The token was issued by someone else.
    #[error("Credential issuer does not match")]
    IssuerMismatch,

    /// The token was issued for a different audience.
    #[error("Credential audience does not match")]
    AudienceMismatch,

    /// The token is not a well formed three segment credential, or lacks a
    /// required claim.
    #[error("Credential is malformed")]
    Malformed,
}

/// Errors in [`CredentialSettings`](crate::CredentialSettings).
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings document could not be parsed.
    #[error("Unable to parse credential settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The signing key is shorter than a 256-bit HMAC key.
    #[error("Signing key must be at least {minimum} bytes, got {actual}")]
    KeyTooShort {
        /// Required length in bytes.
        minimum: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// The credential lifetime is not strictly positive.
    #[error("Credential duration must be positive, got {0} minutes")]
    InvalidDuration(i64),
}

/// Errors while minting a credential.
#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    /// The claims could not be serialized or signed.
    #[error("Unable to encode credential: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    /// The expiry would fall outside the representable time range.
    #[error("Credential expiry is out of range")]
    ExpiryOutOfRange,
}
