use crate::{CatalogError, Requirement};
use std::collections::HashMap;

/// A named authorization rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: String,
    requirement: Requirement,
}

impl Policy {
    /// Create a policy named `name` whose root is `requirement`.
    pub fn new(name: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            name: name.into(),
            requirement,
        }
    }

    /// The policy name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root of the requirement tree.
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }
}

/// An immutable set of policies keyed by name.
///
/// The catalog is populated by a single call to [`PolicyCatalog::register`]
/// and exposes no way to add, replace or remove a policy afterwards. Share it
/// between concurrent requests behind an `Arc`; a different set of policies
/// means building a fresh catalog.
#[derive(Debug, Clone, Default)]
pub struct PolicyCatalog {
    policies: HashMap<String, Policy>,
}

impl PolicyCatalog {
    /// Install `policies` in one step. Fails if two share a name.
    pub fn register(policies: impl IntoIterator<Item = Policy>) -> Result<Self, CatalogError> {
        let mut catalog = HashMap::new();
        for policy in policies {
            if catalog.contains_key(policy.name()) {
                return Err(CatalogError::DuplicatePolicy(policy.name));
            }
            catalog.insert(policy.name.clone(), policy);
        }

        Ok(Self { policies: catalog })
    }

    /// Look a policy up by name.
    pub fn get(&self, name: &str) -> Option<&Policy> {
        self.policies.get(name)
    }

    /// Whether a policy with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    /// Names of every registered policy, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    /// Number of registered policies.
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
