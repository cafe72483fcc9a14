use crate::{AuthorizationError, PolicyCatalog, Requirement};
use mediator_claims::Principal;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Outcome of evaluating a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The principal satisfies the policy.
    Allowed,
    /// The operation must not proceed.
    Denied(Denial),
}

impl Decision {
    /// Whether the decision is [`Decision::Allowed`].
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert into a `Result`, mapping any denial to an
    /// [`AuthorizationError`].
    pub fn into_result(self) -> Result<(), AuthorizationError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied(denial) => Err(denial.into()),
        }
    }
}

/// Reason attached to [`Decision::Denied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// The policy name is not in the catalog. This is a configuration error
    /// and still denies.
    UnknownPolicy {
        /// The requested name.
        policy: String,
    },
    /// The principal does not satisfy the policy.
    Unsatisfied {
        /// The evaluated policy.
        policy: String,
        /// The first requirement that was not met.
        requirement: Requirement,
    },
}

impl Display for Denial {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPolicy { policy } => write!(f, "policy '{policy}' is not registered"),
            Self::Unsatisfied {
                policy,
                requirement,
            } => write!(f, "policy '{policy}' requires {requirement}"),
        }
    }
}

impl From<Denial> for AuthorizationError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::UnknownPolicy { policy } => Self::UnknownPolicy { policy },
            Denial::Unsatisfied {
                policy,
                requirement,
            } => Self::Denied {
                policy,
                requirement: requirement.to_string(),
            },
        }
    }
}

/// Evaluates named policies against principals.
///
/// The engine holds no mutable state; clones share the same catalog and can
/// be used from any number of concurrent tasks.
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    catalog: Arc<PolicyCatalog>,
}

impl PolicyEngine {
    /// Create an engine over `catalog`.
    pub fn new(catalog: impl Into<Arc<PolicyCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    /// Decide whether `principal` satisfies the policy called `policy`.
    ///
    /// An unknown name is denied with [`Denial::UnknownPolicy`], never
    /// allowed by default.
    pub fn evaluate(&self, policy: &str, principal: &Principal) -> Decision {
        let Some(found) = self.catalog.get(policy) else {
            tracing::warn!(policy, "Authorization requested for unregistered policy");
            return Decision::Denied(Denial::UnknownPolicy {
                policy: policy.to_string(),
            });
        };

        let decision = match found.requirement().unmet_by(principal) {
            None => Decision::Allowed,
            Some(requirement) => Decision::Denied(Denial::Unsatisfied {
                policy: policy.to_string(),
                requirement: requirement.clone(),
            }),
        };

        tracing::debug!(
            policy,
            subject = principal.subject(),
            allowed = decision.is_allowed(),
            "Evaluated policy"
        );

        decision
    }

    /// Like [`PolicyEngine::evaluate`], returning a `Result`.
    pub fn authorize(&self, policy: &str, principal: &Principal) -> Result<(), AuthorizationError> {
        self.evaluate(policy, principal).into_result()
    }
}
