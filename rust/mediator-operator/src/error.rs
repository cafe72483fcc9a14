use mediator_credentials::{AuthError, IssueError, SettingsError};
use mediator_pipeline::{ResultEnvelope, codes};
use mediator_policy::{AuthorizationError, CatalogError};

/// Envelope code for a caller that could not be authenticated.
pub const UNAUTHORIZED: &str = "Unauthorized";
/// Envelope code for a caller that is not allowed to run the operation.
pub const FORBIDDEN: &str = "Forbidden";
/// Envelope code for an operation guarded by an unregistered policy.
pub const UNKNOWN_POLICY: &str = "ERR-UNKNOWN-POLICY";

/// Why a caller was turned away before reaching a pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// No credential was presented.
    #[error("No credential was presented")]
    MissingCredential,

    /// The presented credential was rejected.
    #[error(transparent)]
    Authentication(#[from] AuthError),

    /// The caller is authenticated but the policy does not allow them.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// Login with an unknown user name or a wrong password.
    #[error("Invalid user name or password")]
    InvalidLogin,

    /// A credential could not be minted.
    #[error(transparent)]
    Issue(#[from] IssueError),
}

impl AccessError {
    /// HTTP style status code for this error.
    ///
    /// | Error | Status |
    /// |---|---|
    /// | missing or rejected credential, invalid login | 401 |
    /// | policy denied | 403 |
    /// | unregistered policy, issuance failure | 500 |
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredential | Self::Authentication(_) | Self::InvalidLogin => 401,
            Self::Authorization(AuthorizationError::Denied { .. }) => 403,
            Self::Authorization(AuthorizationError::UnknownPolicy { .. }) | Self::Issue(_) => 500,
        }
    }

    /// Envelope code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCredential | Self::Authentication(_) | Self::InvalidLogin => UNAUTHORIZED,
            Self::Authorization(AuthorizationError::Denied { .. }) => FORBIDDEN,
            Self::Authorization(AuthorizationError::UnknownPolicy { .. }) => UNKNOWN_POLICY,
            Self::Issue(_) => codes::UNHANDLED,
        }
    }

    /// The error envelope a caller sees instead of the operation's result.
    pub fn into_envelope<T>(self) -> ResultEnvelope<T> {
        let message = match self.status_code() {
            401 => "Authentication failed",
            403 => "Access denied",
            _ => "The request could not be authorized",
        };
        ResultEnvelope::error(message, [self.to_string()], self.code())
            .with_status_code(self.status_code())
    }
}

/// Why a [`Gateway`](crate::Gateway) could not be assembled.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The credential settings were rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The policy catalog could not be registered.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_separates_authentication_from_authorization() {
        let expired: ResultEnvelope<()> = AccessError::from(AuthError::Expired).into_envelope();
        assert_eq!(expired.status_code(), 401);
        assert_eq!(expired.code(), Some(UNAUTHORIZED));
        assert_eq!(expired.errors(), ["Credential has expired"]);

        let denied: ResultEnvelope<()> = AccessError::from(AuthorizationError::Denied {
            policy: "IsAdmin".into(),
            requirement: "role(Admin)".into(),
        })
        .into_envelope();
        assert_eq!(denied.status_code(), 403);
        assert_eq!(denied.code(), Some(FORBIDDEN));
        assert_eq!(
            denied.errors(),
            ["Access denied by policy 'IsAdmin': requires role(Admin)"]
        );
    }

    #[test]
    fn it_reports_unknown_policies_as_configuration_errors() {
        let error = AccessError::from(AuthorizationError::UnknownPolicy {
            policy: "CanFly".into(),
        });
        assert_eq!(error.status_code(), 500);
        assert_eq!(error.code(), UNKNOWN_POLICY);
    }
}
