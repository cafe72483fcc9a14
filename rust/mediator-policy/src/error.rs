/// Errors raised while building a [`PolicyCatalog`](crate::PolicyCatalog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two policies were registered under the same name.
    #[error("Policy '{0}' is registered more than once")]
    DuplicatePolicy(String),
}

/// Why an operation may not proceed.
///
/// This is the `Result`-shaped view of a
/// [`Decision::Denied`](crate::Decision::Denied). A misconfigured policy name
/// is reported separately from a caller that simply lacks the claims.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// No policy with this name was registered.
    #[error("Policy '{policy}' is not registered")]
    UnknownPolicy {
        /// The requested policy name.
        policy: String,
    },

    /// The policy exists but the principal does not satisfy it.
    #[error("Access denied by policy '{policy}': requires {requirement}")]
    Denied {
        /// The evaluated policy name.
        policy: String,
        /// The first requirement the principal did not meet.
        requirement: String,
    },
}
