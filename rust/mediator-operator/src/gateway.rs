use crate::{AccessError, GatewayError};
use mediator_claims::{Principal, permissions, roles};
use mediator_credentials::{Credential, CredentialSettings, TokenIssuer};
use mediator_pipeline::{Pipeline, Request, ResultEnvelope};
use mediator_policy::{PolicyCatalog, PolicyEngine};
use tokio_util::sync::CancellationToken;

const DEMO_USER: &str = "demo";
const DEMO_PASSWORD: &str = "demo";
const BEARER_PREFIX: &str = "Bearer ";

/// A request type guarded by a named policy.
pub trait Protected: Request {
    /// The policy a caller must satisfy before the request is dispatched.
    const POLICY: &'static str;
}

/// The entry point in front of every pipeline.
///
/// A call is authenticated (credential decoded into a [`Principal`]), then
/// authorized (policy evaluated against that principal), and only then handed
/// to the pipeline. Rejections at either step are answered with an error
/// envelope and never reach a behavior or handler.
#[derive(Debug, Clone)]
pub struct Gateway {
    issuer: TokenIssuer,
    engine: PolicyEngine,
}

impl Gateway {
    /// Create a gateway from its parts.
    pub fn new(issuer: TokenIssuer, engine: PolicyEngine) -> Self {
        Self { issuer, engine }
    }

    /// A gateway over [`PolicyCatalog::standard`], signing with `settings`.
    pub fn from_settings(settings: CredentialSettings) -> Result<Self, GatewayError> {
        Ok(Self::new(
            TokenIssuer::new(settings)?,
            PolicyEngine::new(PolicyCatalog::standard()?),
        ))
    }

    /// The credential issuer.
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// The policy engine.
    pub fn engine(&self) -> &PolicyEngine {
        &self.engine
    }

    /// Exchange a user name and password for a credential.
    ///
    /// Only the demo account (`demo` / `demo`) exists. It is granted the
    /// `Admin` and `User` roles and the `read_products` and `create_products`
    /// permissions.
    pub fn login(&self, user_name: &str, password: &str) -> Result<Credential, AccessError> {
        if user_name != DEMO_USER || password != DEMO_PASSWORD {
            tracing::info!(user_name, "Rejected login");
            return Err(AccessError::InvalidLogin);
        }

        let credential = self.issuer.issue(
            user_name,
            [roles::ADMIN, roles::USER],
            [permissions::READ_PRODUCTS, permissions::CREATE_PRODUCTS],
        )?;
        tracing::info!(user_name, token_id = credential.token_id(), "Issued credential");
        Ok(credential)
    }

    /// Decode the credential in an `Authorization` header value.
    ///
    /// Accepts the bare token or the token behind a `Bearer ` prefix.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Principal, AccessError> {
        let token = authorization
            .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or(AccessError::MissingCredential)?;

        Ok(self.issuer.decode(token)?)
    }

    /// Check `principal` against the policy called `policy`.
    pub fn authorize(&self, policy: &str, principal: &Principal) -> Result<(), AccessError> {
        Ok(self.engine.authorize(policy, principal)?)
    }

    /// Authenticate, authorize against `policy`, then run `request` through
    /// `pipeline`.
    pub async fn dispatch<R: Request>(
        &self,
        authorization: Option<&str>,
        policy: &str,
        pipeline: &Pipeline<R>,
        request: R,
        cancellation: &CancellationToken,
    ) -> ResultEnvelope<R::Output> {
        let admitted = self
            .authenticate(authorization)
            .and_then(|principal| self.authorize(policy, &principal).map(|()| principal));

        match admitted {
            Ok(principal) => {
                tracing::debug!(
                    request = R::name(),
                    policy,
                    subject = principal.subject(),
                    "Dispatching request"
                );
                pipeline.send(request, cancellation).await
            }
            Err(error) => {
                tracing::info!(
                    request = R::name(),
                    policy,
                    status_code = error.status_code(),
                    "Refused request: {error}"
                );
                error.into_envelope()
            }
        }
    }

    /// [`Gateway::dispatch`] with the policy declared by the request type.
    pub async fn send<R: Protected>(
        &self,
        authorization: Option<&str>,
        pipeline: &Pipeline<R>,
        request: R,
        cancellation: &CancellationToken,
    ) -> ResultEnvelope<R::Output> {
        self.dispatch(authorization, R::POLICY, pipeline, request, cancellation)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediator_credentials::{AuthError, SettingsError};
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn settings() -> CredentialSettings {
        CredentialSettings {
            key: "gateway-test-signing-key-0123456789".into(),
            issuer: "mediator".into(),
            audience: "mediator-clients".into(),
            duration_in_minutes: 5,
        }
    }

    fn gateway() -> Gateway {
        Gateway::from_settings(settings()).unwrap()
    }

    #[test]
    fn it_refuses_to_start_with_weak_settings() {
        assert!(matches!(
            Gateway::from_settings(CredentialSettings {
                duration_in_minutes: 0,
                ..settings()
            }),
            Err(GatewayError::Settings(SettingsError::InvalidDuration(0)))
        ));
    }

    #[test]
    fn it_logs_in_the_demo_account() -> TestResult {
        let gateway = gateway();
        let credential = gateway.login("demo", "demo")?;
        let principal = gateway.authenticate(Some(&format!("Bearer {credential}")))?;

        assert_eq!(principal.subject(), "demo");
        assert_eq!(principal.roles().collect::<Vec<_>>(), ["Admin", "User"]);
        assert_eq!(
            principal.permissions().collect::<Vec<_>>(),
            ["read_products", "create_products"]
        );
        Ok(())
    }

    #[test]
    fn it_rejects_other_logins() {
        let gateway = gateway();
        assert!(matches!(
            gateway.login("demo", "wrong"),
            Err(AccessError::InvalidLogin)
        ));
        assert!(matches!(
            gateway.login("admin", "demo"),
            Err(AccessError::InvalidLogin)
        ));
    }

    #[test]
    fn it_requires_a_credential() {
        let gateway = gateway();
        assert!(matches!(
            gateway.authenticate(None),
            Err(AccessError::MissingCredential)
        ));
        assert!(matches!(
            gateway.authenticate(Some("Bearer ")),
            Err(AccessError::MissingCredential)
        ));
        assert!(matches!(
            gateway.authenticate(Some("Bearer not-a-token")),
            Err(AccessError::Authentication(AuthError::Malformed))
        ));
    }

    #[test]
    fn it_accepts_bare_tokens() -> TestResult {
        let gateway = gateway();
        let credential = gateway.login("demo", "demo")?;
        assert_eq!(gateway.authenticate(Some(credential.as_str()))?.subject(), "demo");
        Ok(())
    }
}
