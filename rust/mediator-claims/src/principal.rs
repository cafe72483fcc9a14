use crate::{Claim, ClaimKind};

/// An authenticated caller: a subject plus the claims presented for it.
///
/// A principal lives for one request. It has no setters; a changed claim set
/// means a new principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    claims: Vec<Claim>,
}

impl Principal {
    /// Create a principal from a subject and its claims. Duplicate claims are
    /// preserved.
    pub fn new(subject: impl Into<String>, claims: impl IntoIterator<Item = Claim>) -> Self {
        Self {
            subject: subject.into(),
            claims: claims.into_iter().collect(),
        }
    }

    /// The subject identifier.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Every claim, in the order it was supplied.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Values of every claim of the given kind.
    pub fn values_of(&self, kind: ClaimKind) -> impl Iterator<Item = &str> {
        self.claims
            .iter()
            .filter(move |claim| claim.kind == kind)
            .map(|claim| claim.value.as_str())
    }

    /// Role claim values.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.values_of(ClaimKind::Role)
    }

    /// Permission claim values.
    pub fn permissions(&self) -> impl Iterator<Item = &str> {
        self.values_of(ClaimKind::Permission)
    }

    /// Whether any claim has exactly this kind and value (case sensitive).
    pub fn has_claim(&self, kind: &ClaimKind, value: &str) -> bool {
        self.claims.iter().any(|claim| claim.is(kind, value))
    }

    /// Whether the principal holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.has_claim(&ClaimKind::Role, role)
    }

    /// Whether the principal holds `permission`.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.has_claim(&ClaimKind::Permission, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn demo() -> Principal {
        Principal::new(
            "demo",
            [
                Claim::subject("demo"),
                Claim::role("Admin"),
                Claim::role("User"),
                Claim::permission("read_products"),
                Claim::permission("read_products"),
            ],
        )
    }

    #[test]
    fn it_preserves_duplicate_claims() {
        let principal = demo();
        assert_eq!(
            principal.permissions().collect::<Vec<_>>(),
            vec!["read_products", "read_products"]
        );
        assert_eq!(principal.claims().len(), 5);
    }

    #[test]
    fn it_filters_claims_by_kind() {
        let principal = demo();
        assert_eq!(principal.roles().collect::<Vec<_>>(), vec!["Admin", "User"]);
        assert_eq!(principal.subject(), "demo");
    }

    #[test]
    fn it_looks_up_values_of_any_kind() {
        let principal = demo();
        assert_eq!(
            principal.values_of(ClaimKind::Subject).collect::<Vec<_>>(),
            vec!["demo"]
        );
        assert_eq!(principal.values_of(ClaimKind::TokenId).count(), 0);
    }

    #[test]
    fn it_matches_roles_case_sensitively() {
        let principal = demo();
        assert!(principal.has_role("Admin"));
        assert!(!principal.has_role("admin"));
        assert!(!principal.has_permission("Admin"));
    }

    #[test]
    fn it_holds_nothing_without_claims() {
        let principal = Principal::new("nobody", []);
        assert!(!principal.has_role("Admin"));
        assert!(!principal.has_permission("read_products"));
        assert_eq!(principal.roles().count(), 0);
    }
}
