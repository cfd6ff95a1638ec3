use serde::{Deserialize, Serialize};

use crate::domain::payment::format_price;
use crate::domain::product::Product;
use crate::repository::CatalogReader;
use crate::services::ServiceResult;

/// Shortest term the search-as-you-type endpoint queries the backend for.
pub const MIN_TERM_LENGTH: usize = 2;

/// Query parameters of the search-as-you-type endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

/// Entry of the search-as-you-type dropdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub path: String,
    pub vendor: String,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl From<Product> for Suggestion {
    fn from(product: Product) -> Self {
        let price = product
            .price_range
            .min_variant_price
            .value()
            .map(|amount| {
                format_price(amount, &product.price_range.min_variant_price.currency_code)
            });
        Self {
            path: format!("/product/{}", product.handle),
            image: product.featured_image.map(|image| image.url),
            title: product.title,
            vendor: product.vendor,
            price,
        }
    }
}

/// Suggestions for `term`; short or blank terms return nothing without a request.
pub async fn suggestions<R>(repo: &R, term: &str) -> ServiceResult<Vec<Suggestion>>
where
    R: CatalogReader + ?Sized,
{
    let term = term.trim();
    if term.chars().count() < MIN_TERM_LENGTH {
        return Ok(Vec::new());
    }

    let products = repo.predictive_search(term).await?;
    Ok(products.into_iter().map(Suggestion::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::fixtures::product;
    use crate::repository::fake::FakeRepository;
    use crate::services::ServiceError;

    #[actix_web::test]
    async fn suggestions_link_to_product_pages() {
        let repo = FakeRepository::with_products(vec![
            product("Bafle", "JBL", "Parlante", &[], "1500000"),
            product("Consola", "Pioneer", "Consola", &[], "2000000"),
        ]);

        let found = suggestions(&repo, " baf ").await.expect("suggestions");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "/product/bafle");
        assert_eq!(found[0].price.as_deref(), Some("$ 1.500.000"));
    }

    #[actix_web::test]
    async fn short_terms_skip_the_backend() {
        let repo = FakeRepository::with_products(Vec::new());
        repo.fail("predictive_search");

        assert!(suggestions(&repo, "a").await.expect("empty").is_empty());
        assert!(matches!(
            suggestions(&repo, "ab").await,
            Err(ServiceError::Upstream(_))
        ));
    }
}
