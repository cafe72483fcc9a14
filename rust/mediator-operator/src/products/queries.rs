use crate::{ProductDto, Protected};
use mediator_pipeline::{Handler, Outcome, Page, Request, ResultEnvelope, SearchResults};
use mediator_policy::names;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

/// List every product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GetAllProducts;

impl Request for GetAllProducts {
    type Output = Vec<ProductDto>;
}

impl Protected for GetAllProducts {
    const POLICY: &'static str = names::CAN_READ_PRODUCTS;
}

/// Answers [`GetAllProducts`] from the stub catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetAllProductsHandler;

#[async_trait::async_trait]
impl Handler<GetAllProducts> for GetAllProductsHandler {
    async fn handle(
        &self,
        _request: &GetAllProducts,
        _cancellation: &CancellationToken,
    ) -> Outcome<GetAllProducts> {
        Ok(ResultEnvelope::success(
            ProductDto::stub_catalog(),
            "Products retrieved successfully.",
        ))
    }
}

/// Fetch one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProductById {
    /// Product id.
    pub id: i32,
}

impl Request for GetProductById {
    type Output = ProductDto;
}

impl Protected for GetProductById {
    const POLICY: &'static str = names::CAN_READ_PRODUCTS;
}

/// Answers [`GetProductById`], with a not-found envelope for unknown ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetProductByIdHandler;

#[async_trait::async_trait]
impl Handler<GetProductById> for GetProductByIdHandler {
    async fn handle(
        &self,
        request: &GetProductById,
        _cancellation: &CancellationToken,
    ) -> Outcome<GetProductById> {
        Ok(match ProductDto::stub(request.id) {
            Some(product) => ResultEnvelope::success(product, "Product retrieved successfully."),
            None => ResultEnvelope::not_found(format!("Product with Id {} not found.", request.id)),
        })
    }
}

/// Search products by name, one page at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProducts {
    /// Case insensitive name fragment; everything matches when absent.
    pub search_term: Option<String>,
    /// One based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
}

impl SearchProducts {
    /// Page 1 of 5 items.
    pub const DEFAULT_PAGE_SIZE: u32 = 5;

    /// Search for `term` with default paging.
    pub fn for_term(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }
}

impl Default for SearchProducts {
    fn default() -> Self {
        Self {
            search_term: None,
            page: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Request for SearchProducts {
    type Output = SearchResults<ProductDto>;
}

impl Protected for SearchProducts {
    const POLICY: &'static str = names::CAN_READ_PRODUCTS;
}

/// Answers [`SearchProducts`] from the stub catalog.
///
/// Page numbers below 1 are read as page 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchProductsHandler;

#[async_trait::async_trait]
impl Handler<SearchProducts> for SearchProductsHandler {
    async fn handle(
        &self,
        request: &SearchProducts,
        _cancellation: &CancellationToken,
    ) -> Outcome<SearchProducts> {
        let term = request
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let matches: Vec<ProductDto> = ProductDto::stub_catalog()
            .into_iter()
            .filter(|product| {
                term.as_deref()
                    .is_none_or(|term| product.name.to_lowercase().contains(term))
            })
            .collect();

        let page = request.page.max(1);
        let skip = (page as usize - 1).saturating_mul(request.page_size as usize);
        let total_count = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(skip)
            .take(request.page_size as usize)
            .collect();

        let results = SearchResults {
            page: Page::new(items, page, request.page_size, total_count),
            search_term_used: request.search_term.clone(),
            applied_filters: BTreeMap::from([(
                "SearchTerm".to_string(),
                request.search_term.clone().unwrap_or_default(),
            )]),
        };

        Ok(ResultEnvelope::success(results, "Products searched successfully."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    async fn search(request: SearchProducts) -> TestResult<SearchResults<ProductDto>> {
        let envelope = SearchProductsHandler
            .handle(&request, &CancellationToken::new())
            .await?;
        Ok(envelope.into_data().ok_or("search returned no data")?)
    }

    #[tokio::test]
    async fn it_lists_ten_products() -> TestResult {
        let envelope = GetAllProductsHandler
            .handle(&GetAllProducts, &CancellationToken::new())
            .await?;
        let products = envelope.into_data().ok_or("no products")?;

        assert_eq!(products.len(), 10);
        assert_eq!(products[9].name, "Product 10");
        Ok(())
    }

    #[tokio::test]
    async fn it_reports_missing_products() -> TestResult {
        for id in [0, -3, 11] {
            let envelope = GetProductByIdHandler
                .handle(&GetProductById { id }, &CancellationToken::new())
                .await?;
            assert_eq!(envelope.code(), Some(mediator_pipeline::codes::NOT_FOUND));
            assert_eq!(envelope.errors(), [format!("Product with Id {id} not found.")]);
        }
        Ok(())
    }

    #[tokio::test]
    async fn it_pages_through_everything_without_a_term() -> TestResult {
        let first = search(SearchProducts::default()).await?;
        assert_eq!(first.page.items.len(), 5);
        assert_eq!(first.page.total_count, 10);
        assert_eq!(first.page.total_pages(), 2);
        assert_eq!(first.search_term_used, None);
        assert_eq!(first.applied_filters["SearchTerm"], "");

        let third = search(SearchProducts {
            page: 3,
            ..SearchProducts::default()
        })
        .await?;
        assert!(third.page.items.is_empty());
        assert_eq!(third.page.current_page, 3);
        Ok(())
    }

    #[tokio::test]
    async fn it_filters_by_term() -> TestResult {
        let results = search(SearchProducts::for_term("product 1")).await?;

        assert_eq!(
            results
                .page
                .items
                .iter()
                .map(|product| product.id)
                .collect::<Vec<_>>(),
            [1, 10]
        );
        assert_eq!(results.page.total_count, 2);
        assert_eq!(results.search_term_used.as_deref(), Some("product 1"));
        assert_eq!(results.applied_filters["SearchTerm"], "product 1");
        Ok(())
    }
}
