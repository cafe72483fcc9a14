use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of products in the stub catalog; ids run from 1 through this.
pub const STUB_PRODUCT_COUNT: i32 = 10;

/// A product as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    /// Identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
}

impl ProductDto {
    /// The stub product with `id`, if the catalog holds one.
    pub fn stub(id: i32) -> Option<Self> {
        (1..=STUB_PRODUCT_COUNT).contains(&id).then(|| Self {
            id,
            name: format!("Product {id}"),
            price: Decimal::from(id) * Decimal::ONE_HUNDRED,
        })
    }

    /// Every stub product, ordered by id.
    pub fn stub_catalog() -> Vec<Self> {
        (1..=STUB_PRODUCT_COUNT).filter_map(Self::stub).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_prices_stub_products_by_id() {
        assert_eq!(
            ProductDto::stub(3),
            Some(ProductDto {
                id: 3,
                name: "Product 3".into(),
                price: Decimal::from(300),
            })
        );
        assert_eq!(ProductDto::stub(0), None);
        assert_eq!(ProductDto::stub(11), None);
        assert_eq!(ProductDto::stub_catalog().len(), 10);
    }
}
