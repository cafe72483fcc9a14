use crate::token::{self, ALGORITHM, IssuedClaims, PresentedClaims};
use crate::{AuthError, CredentialSettings, IssueError, SettingsError};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use mediator_claims::{Claim, Principal};
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use ulid::Ulid;

/// A freshly minted credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    token_id: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Credential {
    /// The encoded token, as presented by callers.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// The unique `jti` of this credential.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// When the credential was issued.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When the credential stops being accepted.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Display for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

/// Mints credentials and turns presented credentials back into principals.
///
/// The signing key is read-only after construction; clones share it and the
/// issuer may be used from any number of tasks at once.
#[derive(Clone)]
pub struct TokenIssuer {
    settings: Arc<CredentialSettings>,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Create an issuer from validated `settings`.
    pub fn new(settings: CredentialSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let key = settings.key.as_bytes();

        Ok(Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation: token::validation(&settings),
            settings: Arc::new(settings),
        })
    }

    /// The settings this issuer signs and verifies with.
    pub fn settings(&self) -> &CredentialSettings {
        &self.settings
    }

    /// Issue a credential for `subject` valid from now.
    ///
    /// Every call yields a distinct credential, even for identical inputs.
    pub fn issue<R, P>(
        &self,
        subject: &str,
        roles: R,
        permissions: P,
    ) -> Result<Credential, IssueError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        self.issue_at(subject, roles, permissions, Utc::now())
    }

    /// Issue a credential as if the current time were `now`.
    pub fn issue_at<R, P>(
        &self,
        subject: &str,
        roles: R,
        permissions: P,
        now: DateTime<Utc>,
    ) -> Result<Credential, IssueError>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let expires_at = now
            .checked_add_signed(self.settings.lifetime())
            .ok_or(IssueError::ExpiryOutOfRange)?;
        let token_id = Ulid::new().to_string();

        let claims = IssuedClaims {
            sub: subject,
            jti: &token_id,
            name: subject,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: &self.settings.issuer,
            aud: &self.settings.audience,
            role: roles.into_iter().map(Into::into).collect(),
            permission: permissions.into_iter().map(Into::into).collect(),
        };
        let token = jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding)?;

        Ok(Credential {
            token,
            token_id,
            issued_at: now,
            expires_at,
        })
    }

    /// Verify `token` and reconstruct its principal.
    pub fn decode(&self, token: &str) -> Result<Principal, AuthError> {
        self.decode_at(token, Utc::now())
    }

    /// Verify `token` as if the current time were `now`.
    ///
    /// Checks, in order: shape, algorithm, signature, payload, issuer,
    /// audience, expiry. A token is expired from its `exp` second onward.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        self.verify(token, now)
            .map(|claims| {
                let mut granted =
                    Vec::with_capacity(2 + claims.role.len() + claims.permission.len());
                granted.push(Claim::subject(claims.sub.clone()));
                granted.extend(claims.jti.map(Claim::token_id));
                granted.extend(claims.role.into_iter().map(Claim::role));
                granted.extend(claims.permission.into_iter().map(Claim::permission));
                Principal::new(claims.sub, granted)
            })
            .inspect_err(|error| tracing::debug!(%error, "Rejected credential"))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<PresentedClaims, AuthError> {
        let claims = jsonwebtoken::decode::<PresentedClaims>(token, &self.decoding, &self.validation)
            .map_err(|error| token::rejection(&error))?
            .claims;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims)
    }
}

impl Debug for TokenIssuer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
