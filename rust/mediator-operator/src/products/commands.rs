use crate::{ProductDto, Protected, STUB_PRODUCT_COUNT};
use mediator_pipeline::{
    Capabilities, Capability, Handler, Outcome, Request, ResultEnvelope, Rules,
};
use mediator_policy::names;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Longest accepted product name, in characters.
pub const MAX_NAME_LEN: usize = 100;

fn name_is_present(name: &str) -> bool {
    !name.trim().is_empty()
}

fn name_fits(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LEN
}

/// Create a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
}

impl Request for CreateProduct {
    type Output = ProductDto;
    const CAPABILITIES: Capabilities = Capabilities::of(Capability::Validation);
}

impl Protected for CreateProduct {
    const POLICY: &'static str = names::CAN_CREATE_PRODUCTS;
}

impl CreateProduct {
    /// Field rules for [`CreateProduct`].
    pub fn rules() -> Rules<Self> {
        Rules::new()
            .ensure("name", "Name is required.", |r: &Self| name_is_present(&r.name))
            .ensure("name", "Name can't exceed 100 characters.", |r: &Self| {
                name_fits(&r.name)
            })
            .ensure("price", "Price is required.", |r: &Self| !r.price.is_zero())
            .ensure("price", "Price must be greater than 0.", |r: &Self| {
                r.price > Decimal::ZERO
            })
    }
}

/// Answers [`CreateProduct`] with the product as it would be stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateProductHandler;

#[async_trait::async_trait]
impl Handler<CreateProduct> for CreateProductHandler {
    async fn handle(
        &self,
        request: &CreateProduct,
        _cancellation: &CancellationToken,
    ) -> Outcome<CreateProduct> {
        let product = ProductDto {
            id: STUB_PRODUCT_COUNT + 1,
            name: request.name.clone(),
            price: request.price,
        };
        Ok(ResultEnvelope::success(product, "Product created successfully.").with_status_code(201))
    }
}

/// Replace a product's name and price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    /// Product id.
    pub id: i32,
    /// New display name.
    pub name: String,
    /// New unit price.
    pub price: Decimal,
}

impl Request for UpdateProduct {
    type Output = bool;
    const CAPABILITIES: Capabilities = Capabilities::of(Capability::Validation);
}

impl Protected for UpdateProduct {
    const POLICY: &'static str = names::CAN_UPDATE_PRODUCTS;
}

impl UpdateProduct {
    /// Field rules for [`UpdateProduct`].
    pub fn rules() -> Rules<Self> {
        Rules::new()
            .ensure("id", "Id must be greater than 0.", |r: &Self| r.id > 0)
            .ensure("name", "Name is required.", |r: &Self| name_is_present(&r.name))
            .ensure("name", "Name can't exceed 100 characters.", |r: &Self| {
                name_fits(&r.name)
            })
            .ensure("price", "Price is required.", |r: &Self| !r.price.is_zero())
            .ensure("price", "Price must be greater than 0.", |r: &Self| {
                r.price > Decimal::ZERO
            })
    }
}

/// Answers [`UpdateProduct`]; unknown ids are not found.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateProductHandler;

#[async_trait::async_trait]
impl Handler<UpdateProduct> for UpdateProductHandler {
    async fn handle(
        &self,
        request: &UpdateProduct,
        _cancellation: &CancellationToken,
    ) -> Outcome<UpdateProduct> {
        Ok(match ProductDto::stub(request.id) {
            Some(_) => ResultEnvelope::success(true, "Product updated successfully."),
            None => ResultEnvelope::not_found(format!("Product with Id {} not found.", request.id)),
        })
    }
}

/// Delete a product.
///
/// Tagged for validation although no rules are registered for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteProduct {
    /// Product id.
    pub id: i32,
}

impl Request for DeleteProduct {
    type Output = bool;
    const CAPABILITIES: Capabilities = Capabilities::of(Capability::Validation);
}

impl Protected for DeleteProduct {
    const POLICY: &'static str = names::IS_ADMIN;
}

/// Answers [`DeleteProduct`]; unknown ids are not found.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteProductHandler;

#[async_trait::async_trait]
impl Handler<DeleteProduct> for DeleteProductHandler {
    async fn handle(
        &self,
        request: &DeleteProduct,
        _cancellation: &CancellationToken,
    ) -> Outcome<DeleteProduct> {
        Ok(match ProductDto::stub(request.id) {
            Some(_) => ResultEnvelope::success(true, "Product deleted successfully."),
            None => ResultEnvelope::not_found(format!("Product with Id {} not found.", request.id)),
        })
    }
}
