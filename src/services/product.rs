use chrono::{DateTime, Utc};

use crate::domain::payment::{PaymentOptions, whatsapp_link};
use crate::domain::product::Product;
use crate::repository::CatalogReader;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render a product page.
#[derive(Debug, Clone)]
pub struct ProductPageData {
    pub product: Product,
    pub recommendations: Vec<Product>,
    /// Financing and discount alternatives, absent for unpriced products.
    pub payment: Option<PaymentOptions>,
    /// Link opening a WhatsApp chat about the product.
    pub enquiry_url: String,
}

/// Loads a product by handle. Hidden products stay reachable by handle.
pub async fn load_product_page<R>(
    repo: &R,
    handle: &str,
    whatsapp_number: &str,
    now: DateTime<Utc>,
) -> ServiceResult<ProductPageData>
where
    R: CatalogReader + ?Sized,
{
    let product = repo
        .get_product(handle)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let recommendations = match repo.product_recommendations(&product.id).await {
        Ok(products) => products
            .into_iter()
            .filter(|candidate| !candidate.is_hidden())
            .collect(),
        Err(err) => {
            log::warn!("Failed to load recommendations for {handle}: {err}");
            Vec::new()
        }
    };

    let enquiry = format!("Hola, quiero más información sobre \"{}\".", product.title);

    Ok(ProductPageData {
        payment: PaymentOptions::for_product(&product, whatsapp_number, now),
        enquiry_url: whatsapp_link(whatsapp_number, Some(&enquiry)),
        recommendations,
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::HIDDEN_PRODUCT_TAG;
    use crate::domain::product::fixtures::product;
    use crate::repository::fake::FakeRepository;

    #[actix_web::test]
    async fn hidden_products_resolve_by_handle() {
        let repo = FakeRepository::with_products(vec![
            product("Secret", "JBL", "Parlante", &[HIDDEN_PRODUCT_TAG], "100"),
            product("Other", "JBL", "Parlante", &[HIDDEN_PRODUCT_TAG], "100"),
            product("Visible", "JBL", "Parlante", &[], "100"),
        ]);

        let page = load_product_page(&repo, "secret", "573218520566", Utc::now())
            .await
            .expect("page");

        assert_eq!(page.product.id, "Secret");
        let recommended: Vec<&str> = page.recommendations.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(recommended, vec!["Visible"]);
        assert!(page.payment.is_some());
        assert!(page.enquiry_url.starts_with("https://wa.me/573218520566?text="));
    }

    #[actix_web::test]
    async fn recommendation_failures_are_absorbed() {
        let repo = FakeRepository::with_products(vec![product("A", "JBL", "Parlante", &[], "1")]);
        repo.fail("product_recommendations");

        let page = load_product_page(&repo, "a", "1", Utc::now()).await.expect("page");

        assert!(page.recommendations.is_empty());
    }

    #[actix_web::test]
    async fn unknown_handles_are_not_found() {
        let repo = FakeRepository::with_products(Vec::new());

        let result = load_product_page(&repo, "missing", "1", Utc::now()).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
