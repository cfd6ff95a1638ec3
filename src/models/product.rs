use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::product::{
    CollectionRef, Image as DomainImage, PriceRange, Product as DomainProduct, ProductOption,
    ProductPage, ProductVariant, Seo,
};
use crate::models::Connection;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

impl Image {
    /// Convert, labelling images without alt text as `"{title} - {file stem}"`.
    pub fn into_domain(self, title: &str) -> DomainImage {
        let alt_text = match self.alt_text.filter(|alt| !alt.trim().is_empty()) {
            Some(alt) => alt,
            None => format!("{title} - {}", file_stem(&self.url).unwrap_or_default()),
        };
        DomainImage {
            url: self.url,
            alt_text,
            width: self.width,
            height: self.height,
        }
    }
}

/// File name of `url` without its extension, query string or directories.
pub fn file_stem(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let (_, name) = path.rsplit_once('/')?;
    let (stem, _) = name.rsplit_once('.')?;
    Some(stem)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub available_for_sale: bool,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    pub price_range: PriceRange,
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
    #[serde(default)]
    pub featured_image: Option<Image>,
    #[serde(default)]
    pub images: Connection<Image>,
    #[serde(default)]
    pub collections: Connection<CollectionRef>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        let title = value.title;
        Self {
            featured_image: value.featured_image.map(|image| image.into_domain(&title)),
            images: value
                .images
                .into_nodes()
                .into_iter()
                .map(|image| image.into_domain(&title))
                .collect(),
            variants: value.variants.into_nodes(),
            collections: value.collections.into_nodes(),
            id: value.id,
            handle: value.handle,
            available_for_sale: value.available_for_sale,
            description: value.description,
            description_html: value.description_html,
            vendor: value.vendor,
            product_type: value.product_type,
            options: value.options,
            price_range: value.price_range,
            tags: value.tags,
            seo: value.seo.unwrap_or_default(),
            updated_at: value.updated_at,
            title,
        }
    }
}

/// Convert listed products, dropping those carrying the hidden tag.
pub fn into_visible_products(products: Vec<Product>) -> Vec<DomainProduct> {
    products
        .into_iter()
        .map(DomainProduct::from)
        .filter(|product| !product.is_hidden())
        .collect()
}

/// Convert a product connection into a page of visible products.
pub fn into_product_page(connection: Connection<Product>) -> ProductPage {
    let page_info = connection.page_info.clone();
    ProductPage::new(into_visible_products(connection.into_nodes()), page_info)
}


#[cfg(test)]
mod tests {
    use super::fixtures::product_node;
    use super::*;
    use crate::domain::product::HIDDEN_PRODUCT_TAG;
    use serde_json::json;

    #[test]
    fn missing_alt_text_is_generated_from_the_file_name() {
        let product: Product =
            serde_json::from_value(product_node("bafle", "JBL", &[], "100")).expect("product");
        let product = DomainProduct::from(product);

        assert_eq!(
            product.featured_image.clone().map(|image| image.alt_text),
            Some("Producto bafle - bafle".to_string())
        );
        assert_eq!(product.images[0].alt_text, "Producto bafle - bafle-side");
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.max_price(), Some(100.0));
    }

    #[test]
    fn hidden_products_are_dropped_from_lists() {
        let connection: Connection<Product> = serde_json::from_value(json!({
            "edges": [
                {"node": product_node("a", "JBL", &[], "1")},
                {"node": product_node("b", "JBL", &[HIDDEN_PRODUCT_TAG], "1")}
            ],
            "pageInfo": {"hasNextPage": true, "hasPreviousPage": false,
                         "startCursor": "s", "endCursor": "e"}
        }))
        .expect("connection");

        let page = into_product_page(connection);

        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].handle, "a");
        assert_eq!(page.page_info.next_cursor(), Some("e"));
    }

    #[test]
    fn file_stem_ignores_query_and_directories() {
        assert_eq!(file_stem("https://cdn/x/y/photo.final.webp?v=2"), Some("photo.final"));
        assert_eq!(file_stem("no-extension"), None);
    }
}
