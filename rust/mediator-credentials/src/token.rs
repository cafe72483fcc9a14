//! Claim sets carried by the compact `header.payload.signature` token.

use crate::{AuthError, CredentialSettings};
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{Algorithm, Validation};
use serde::{Deserialize, Deserializer, Serialize};

/// The only signature algorithm issued or accepted.
pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

/// Registered fields every presented token must carry.
const REQUIRED: [&str; 4] = ["sub", "exp", "iss", "aud"];

/// What an issued token carries.
#[derive(Debug, Serialize)]
pub(crate) struct IssuedClaims<'a> {
    pub sub: &'a str,
    pub jti: &'a str,
    pub name: &'a str,
    pub iat: i64,
    pub exp: i64,
    pub iss: &'a str,
    pub aud: &'a str,
    pub role: Vec<String>,
    pub permission: Vec<String>,
}

/// What is read back from a presented token once its signature, issuer and
/// audience have been checked.
///
/// `role` and `permission` may be a single string or an array; `jti` and
/// `name` may be absent.
#[derive(Debug, Deserialize)]
pub(crate) struct PresentedClaims {
    pub sub: String,
    #[serde(default)]
    pub jti: Option<String>,
    pub exp: i64,
    #[serde(default, deserialize_with = "one_or_many")]
    pub role: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub permission: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Signature, algorithm, issuer and audience checks for `settings`.
///
/// Expiry is left to the caller so it can be judged against an explicit
/// instant, expired from the `exp` second onward.
pub(crate) fn validation(settings: &CredentialSettings) -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.set_required_spec_claims(&REQUIRED);
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation
}

/// Collapse a decoding error into the reason reported to callers.
pub(crate) fn rejection(error: &Error) -> AuthError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::InvalidIssuer => AuthError::IssuerMismatch,
        ErrorKind::InvalidAudience => AuthError::AudienceMismatch,
        _ => AuthError::Malformed,
    }
}
