//! Policy based authorization.
//!
//! A [`Policy`] gives a name to a tree of [`Requirement`]s. Leaves ask for a
//! single role or permission claim; [`Requirement::AllOf`] and
//! [`Requirement::AnyOf`] combine them and may nest arbitrarily deep.
//!
//! Policies are installed once, in bulk, into an immutable
//! [`PolicyCatalog`]. A [`PolicyEngine`] looks a policy up by name and
//! evaluates it against a [`Principal`](mediator_claims::Principal):
//!
//! ```rust
//! use mediator_claims::{Claim, Principal};
//! use mediator_policy::{Policy, PolicyCatalog, PolicyEngine, Requirement};
//!
//! let catalog = PolicyCatalog::register([Policy::new(
//!     "AdminCanCreateProducts",
//!     Requirement::role("Admin").and(Requirement::permission("create_products")),
//! )])
//! .unwrap();
//! let engine = PolicyEngine::new(catalog);
//!
//! let admin = Principal::new(
//!     "demo",
//!     [Claim::role("Admin"), Claim::permission("create_products")],
//! );
//! assert!(engine.evaluate("AdminCanCreateProducts", &admin).is_allowed());
//!
//! let user = Principal::new("guest", [Claim::role("User")]);
//! assert!(!engine.evaluate("AdminCanCreateProducts", &user).is_allowed());
//!
//! // Unknown policies fail closed.
//! assert!(!engine.evaluate("NoSuchPolicy", &admin).is_allowed());
//! ```
//!
//! # Evaluation
//!
//! | Requirement | Satisfied when |
//! |---|---|
//! | `Role(r)` | the principal holds a role claim exactly equal to `r` |
//! | `Permission(p)` | the principal holds a permission claim exactly equal to `p` |
//! | `AllOf(children)` | every child is satisfied; vacuously true when empty |
//! | `AnyOf(children)` | at least one child is satisfied; false when empty |
//!
//! Evaluation is pure and short circuits: `AllOf` stops at the first unmet
//! child, `AnyOf` at the first satisfied one.

mod error;
pub use error::*;

mod requirement;
pub use requirement::*;

mod catalog;
pub use catalog::*;

mod engine;
pub use engine::*;

pub mod names;
