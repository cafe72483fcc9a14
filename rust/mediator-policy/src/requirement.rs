use mediator_claims::Principal;
use std::fmt::{Display, Formatter};

/// A node in a policy's requirement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The principal must hold this role.
    Role(String),
    /// The principal must hold this permission.
    Permission(String),
    /// Every child must be satisfied.
    AllOf(Vec<Requirement>),
    /// At least one child must be satisfied.
    AnyOf(Vec<Requirement>),
}

impl Requirement {
    /// Require a role claim.
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role(role.into())
    }

    /// Require a permission claim.
    pub fn permission(permission: impl Into<String>) -> Self {
        Self::Permission(permission.into())
    }

    /// Require every one of `requirements`.
    pub fn all_of(requirements: impl IntoIterator<Item = Requirement>) -> Self {
        Self::AllOf(requirements.into_iter().collect())
    }

    /// Require at least one of `requirements`.
    pub fn any_of(requirements: impl IntoIterator<Item = Requirement>) -> Self {
        Self::AnyOf(requirements.into_iter().collect())
    }

    /// Require at least one of the given roles.
    pub fn any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::any_of(roles.into_iter().map(Self::role))
    }

    /// Conjunction of `self` and `other`. Chained calls extend a single
    /// `AllOf` instead of nesting.
    pub fn and(self, other: Requirement) -> Self {
        match self {
            Self::AllOf(mut children) => {
                children.push(other);
                Self::AllOf(children)
            }
            requirement => Self::AllOf(vec![requirement, other]),
        }
    }

    /// Disjunction of `self` and `other`. Chained calls extend a single
    /// `AnyOf` instead of nesting.
    pub fn or(self, other: Requirement) -> Self {
        match self {
            Self::AnyOf(mut children) => {
                children.push(other);
                Self::AnyOf(children)
            }
            requirement => Self::AnyOf(vec![requirement, other]),
        }
    }

    /// Whether `principal` satisfies this requirement.
    pub fn is_satisfied_by(&self, principal: &Principal) -> bool {
        match self {
            Self::Role(role) => principal.has_role(role),
            Self::Permission(permission) => principal.has_permission(permission),
            Self::AllOf(children) => children.iter().all(|child| child.is_satisfied_by(principal)),
            Self::AnyOf(children) => children.iter().any(|child| child.is_satisfied_by(principal)),
        }
    }

    /// The first requirement `principal` fails, if any.
    ///
    /// Descends into `AllOf` to pinpoint the failing child; an unmet `AnyOf`
    /// is reported as a whole since none of its alternatives is to blame.
    pub fn unmet_by(&self, principal: &Principal) -> Option<&Requirement> {
        match self {
            Self::AllOf(children) => children.iter().find_map(|child| child.unmet_by(principal)),
            requirement if requirement.is_satisfied_by(principal) => None,
            requirement => Some(requirement),
        }
    }
}

impl Display for Requirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (label, children) = match self {
            Self::Role(role) => return write!(f, "role({role})"),
            Self::Permission(permission) => return write!(f, "permission({permission})"),
            Self::AllOf(children) => ("all", children),
            Self::AnyOf(children) => ("any", children),
        };

        write!(f, "{label}(")?;
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}
