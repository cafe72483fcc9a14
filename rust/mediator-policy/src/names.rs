//! Names of the standard product policies and the catalog that defines them.

use crate::{CatalogError, Policy, PolicyCatalog, Requirement};
use mediator_claims::{permissions, roles};

/// Read products.
pub const CAN_READ_PRODUCTS: &str = "CanReadProducts";
/// Create products.
pub const CAN_CREATE_PRODUCTS: &str = "CanCreateProducts";
/// Update products.
pub const CAN_UPDATE_PRODUCTS: &str = "CanUpdateProducts";
/// Delete products.
pub const CAN_DELETE_PRODUCTS: &str = "CanDeleteProducts";
/// Holds the admin role.
pub const IS_ADMIN: &str = "IsAdmin";
/// Admin role and the create permission.
pub const ADMIN_CAN_CREATE_PRODUCTS: &str = "AdminCanCreateProducts";
/// Admin or user role, and the create permission.
pub const ADMIN_OR_USER_CAN_CREATE_PRODUCTS: &str = "AdminOrUserCanCreateProducts";

impl PolicyCatalog {
    /// The product policies.
    pub fn standard() -> Result<Self, CatalogError> {
        let policies = [
            Policy::new(
                CAN_READ_PRODUCTS,
                Requirement::permission(permissions::READ_PRODUCTS),
            ),
            Policy::new(
                CAN_CREATE_PRODUCTS,
                Requirement::permission(permissions::CREATE_PRODUCTS),
            ),
            Policy::new(
                CAN_UPDATE_PRODUCTS,
                Requirement::permission(permissions::UPDATE_PRODUCTS),
            ),
            Policy::new(
                CAN_DELETE_PRODUCTS,
                Requirement::permission(permissions::DELETE_PRODUCTS),
            ),
            Policy::new(IS_ADMIN, Requirement::role(roles::ADMIN)),
            Policy::new(
                ADMIN_CAN_CREATE_PRODUCTS,
                Requirement::role(roles::ADMIN)
                    .and(Requirement::permission(permissions::CREATE_PRODUCTS)),
            ),
            Policy::new(
                ADMIN_OR_USER_CAN_CREATE_PRODUCTS,
                Requirement::any_role([roles::ADMIN, roles::USER])
                    .and(Requirement::permission(permissions::CREATE_PRODUCTS)),
            ),
        ];

        Self::register(policies)
    }
}
