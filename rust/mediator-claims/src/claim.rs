use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The kind of fact a [`Claim`] asserts.
///
/// `role` and `permission` are the literal payload field names of a
/// credential. The subject and token id travel in the registered `sub` and
/// `jti` fields, so `sub` also reads as [`ClaimKind::Subject`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClaimKind {
    /// A role the caller holds, e.g. `Admin`.
    Role,
    /// A fine grained permission, e.g. `create_products`.
    Permission,
    /// The subject identifier of the caller.
    Subject,
    /// The unique identifier of the credential the claims came from.
    TokenId,
    /// A display name for the caller.
    Name,
    /// Any other claim kind.
    Other(String),
}

impl ClaimKind {
    /// Wire name of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Role => "role",
            Self::Permission => "permission",
            Self::Subject => "subject",
            Self::TokenId => "jti",
            Self::Name => "name",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ClaimKind {
    fn from(name: &str) -> Self {
        match name {
            "role" => Self::Role,
            "permission" => Self::Permission,
            "subject" | "sub" => Self::Subject,
            "jti" => Self::TokenId,
            "name" => Self::Name,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ClaimKind {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<ClaimKind> for String {
    fn from(kind: ClaimKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Display for ClaimKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(kind, value)` fact about an authenticated caller.
///
/// Claims carry no uniqueness constraint: a caller may hold the same
/// permission twice (e.g. granted through two roles) and both copies are
/// kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Claim {
    /// What the claim is about.
    pub kind: ClaimKind,
    /// The asserted value.
    pub value: String,
}

impl Claim {
    /// Create a claim of an arbitrary kind.
    pub fn new(kind: impl Into<ClaimKind>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// A [`ClaimKind::Role`] claim.
    pub fn role(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::Role, value)
    }

    /// A [`ClaimKind::Permission`] claim.
    pub fn permission(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::Permission, value)
    }

    /// A [`ClaimKind::Subject`] claim.
    pub fn subject(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::Subject, value)
    }

    /// A [`ClaimKind::TokenId`] claim.
    pub fn token_id(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::TokenId, value)
    }

    /// Whether this claim has the given kind and exactly the given value.
    pub fn is(&self, kind: &ClaimKind, value: &str) -> bool {
        &self.kind == kind && self.value == value
    }
}

impl Display for Claim {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.kind, self.value)
    }
}
