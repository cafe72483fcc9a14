#![warn(missing_docs)]

//! Claims about an authenticated caller.
//!
//! A [`Principal`] is what the rest of the system knows about whoever
//! presented a credential: a subject identifier plus an unordered multiset of
//! [`Claim`]s. Principals are rebuilt from the credential on every request and
//! are never mutated after construction.
//!
//! ```rust
//! use mediator_claims::{Claim, Principal, permissions, roles};
//!
//! let principal = Principal::new(
//!     "demo",
//!     [
//!         Claim::role(roles::ADMIN),
//!         Claim::permission(permissions::CREATE_PRODUCTS),
//!     ],
//! );
//!
//! assert!(principal.has_role("Admin"));
//! assert!(principal.has_permission("create_products"));
//! assert!(!principal.has_role("admin"));
//! ```

mod claim;
pub use claim::*;

mod principal;
pub use principal::*;

/// Role names understood by the standard policy catalog.
pub mod roles {
    /// Full administrative access.
    pub const ADMIN: &str = "Admin";
    /// Regular authenticated user.
    pub const USER: &str = "User";
}

/// Permission names understood by the standard policy catalog.
pub mod permissions {
    /// List and read products.
    pub const READ_PRODUCTS: &str = "read_products";
    /// Create new products.
    pub const CREATE_PRODUCTS: &str = "create_products";
    /// Modify existing products.
    pub const UPDATE_PRODUCTS: &str = "update_products";
    /// Remove products.
    pub const DELETE_PRODUCTS: &str = "delete_products";
}
