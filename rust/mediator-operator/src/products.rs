//! Product operations over a fixed stub catalog.
//!
//! | Request | Policy | Validated |
//! |---|---|---|
//! | [`GetAllProducts`] | `CanReadProducts` | no |
//! | [`GetProductById`] | `CanReadProducts` | no |
//! | [`SearchProducts`] | `CanReadProducts` | no |
//! | [`CreateProduct`] | `CanCreateProducts` | name, price |
//! | [`UpdateProduct`] | `CanUpdateProducts` | id, name, price |
//! | [`DeleteProduct`] | `IsAdmin` | tagged, no rules |

mod model;
pub use model::*;

mod queries;
pub use queries::*;

mod commands;
pub use commands::*;

use mediator_pipeline::Pipeline;

/// One pipeline per product operation, each wrapped in the standard
/// behaviors.
#[derive(Debug, Clone)]
pub struct ProductPipelines {
    /// [`GetAllProducts`].
    pub get_all: Pipeline<GetAllProducts>,
    /// [`GetProductById`].
    pub get_by_id: Pipeline<GetProductById>,
    /// [`SearchProducts`].
    pub search: Pipeline<SearchProducts>,
    /// [`CreateProduct`].
    pub create: Pipeline<CreateProduct>,
    /// [`UpdateProduct`].
    pub update: Pipeline<UpdateProduct>,
    /// [`DeleteProduct`].
    pub delete: Pipeline<DeleteProduct>,
}

impl ProductPipelines {
    /// Assemble every product pipeline.
    pub fn new() -> Self {
        Self {
            get_all: Pipeline::builder(GetAllProductsHandler)
                .with_standard_behaviors([])
                .build(),
            get_by_id: Pipeline::builder(GetProductByIdHandler)
                .with_standard_behaviors([])
                .build(),
            search: Pipeline::builder(SearchProductsHandler)
                .with_standard_behaviors([])
                .build(),
            create: Pipeline::builder(CreateProductHandler)
                .with_standard_behaviors([CreateProduct::rules().shared()])
                .build(),
            update: Pipeline::builder(UpdateProductHandler)
                .with_standard_behaviors([UpdateProduct::rules().shared()])
                .build(),
            delete: Pipeline::builder(DeleteProductHandler)
                .with_standard_behaviors([])
                .build(),
        }
    }
}

impl Default for ProductPipelines {
    fn default() -> Self {
        Self::new()
    }
}
