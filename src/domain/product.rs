use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::page_info::PageInfo;

/// Tag that hides a product from every listing while keeping it reachable by handle.
pub const HIDDEN_PRODUCT_TAG: &str = "nextjs-frontend-hidden";

/// Monetary amount exactly as the commerce API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Money {
    /// Decimal amount kept as a string to preserve precision.
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Build a money value from its parts.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Zero amount used when the API omits a cost component.
    pub fn zero_usd() -> Self {
        Self::new("0.0", "USD")
    }

    /// Numeric value of the amount, `None` when it does not parse.
    pub fn value(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

/// Lowest and highest variant price of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct PriceRange {
    /// Price of the cheapest variant.
    pub min_variant_price: Money,
    /// Price of the most expensive variant.
    pub max_variant_price: Money,
}

/// Product or media image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL on the commerce CDN.
    pub url: String,
    /// Alt text, filled with a generated label when the API has none.
    pub alt_text: String,
    /// Width in pixels when known.
    pub width: Option<i64>,
    /// Height in pixels when known.
    pub height: Option<i64>,
}

/// Option value selected on a variant, for example `Color: Black`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// Purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ProductVariant {
    /// Merchandise identifier used by cart mutations.
    pub id: String,
    /// Variant title such as `Default Title`.
    pub title: String,
    /// Whether the variant can currently be bought.
    pub available_for_sale: bool,
    /// Units in stock when the store exposes inventory.
    pub quantity_available: Option<i64>,
    /// Option values identifying the variant.
    pub selected_options: Vec<SelectedOption>,
    /// Variant price.
    pub price: Money,
}

/// Product option with its possible values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub name: String,
    pub values: Vec<String>,
}

/// Collection a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct CollectionRef {
    pub id: String,
    pub handle: String,
    pub title: String,
}

/// Search engine metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Seo {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Catalog product owned by the commerce backend. The storefront never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Global identifier of the product.
    pub id: String,
    /// URL handle used in `/product/{handle}`.
    pub handle: String,
    /// Whether at least one variant is available.
    pub available_for_sale: bool,
    /// Product title.
    pub title: String,
    /// Plain-text description.
    pub description: String,
    /// HTML description rendered on the product page.
    pub description_html: String,
    /// Brand of the product.
    pub vendor: String,
    /// Product type used by the type facet.
    pub product_type: String,
    /// Configurable options.
    pub options: Vec<ProductOption>,
    /// Lowest and highest variant price.
    pub price_range: PriceRange,
    /// Purchasable variants.
    pub variants: Vec<ProductVariant>,
    /// Main image shown in grids.
    pub featured_image: Option<Image>,
    /// Gallery images.
    pub images: Vec<Image>,
    /// Collections containing the product.
    pub collections: Vec<CollectionRef>,
    /// Tags, used as categories by the filters.
    pub tags: Vec<String>,
    /// Search engine metadata.
    pub seo: Seo,
    /// Last modification time reported by the backend.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Price of the most expensive variant, the value filters and facets work on.
    pub fn max_price(&self) -> Option<f64> {
        self.price_range.max_variant_price.value()
    }

    /// Whether the product carries the hidden tag.
    pub fn is_hidden(&self) -> bool {
        self.tags.iter().any(|tag| tag == HIDDEN_PRODUCT_TAG)
    }

    /// First variant that can be bought, used as the default add-to-cart target.
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|variant| variant.available_for_sale)
            .or_else(|| self.variants.first())
    }
}

/// One page of a product connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products on the page, hidden products already removed.
    pub products: Vec<Product>,
    /// Cursor state after the page.
    pub page_info: PageInfo,
}

impl ProductPage {
    /// Build a page from its parts.
    pub fn new(products: Vec<Product>, page_info: PageInfo) -> Self {
        Self {
            products,
            page_info,
        }
    }

    /// Page with no products and no further pages.
    pub fn empty() -> Self {
        Self::default()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn max_price_parses_the_amount() {
        let item = product("P1", "JBL", "Parlante", &[], "150000.0");
        assert_eq!(item.max_price(), Some(150000.0));
    }

    #[test]
    fn max_price_is_none_for_garbage() {
        let item = product("P1", "JBL", "Parlante", &[], "n/a");
        assert_eq!(item.max_price(), None);
    }

    #[test]
    fn hidden_tag_is_detected() {
        let item = product("P1", "JBL", "Parlante", &[HIDDEN_PRODUCT_TAG], "1");
        assert!(item.is_hidden());
    }

    #[test]
    fn default_variant_prefers_available() {
        let mut item = product("P1", "JBL", "Parlante", &[], "1");
        let variant = |id: &str, available: bool| ProductVariant {
            id: id.to_string(),
            title: id.to_string(),
            available_for_sale: available,
            quantity_available: None,
            selected_options: Vec::new(),
            price: Money::new("1", "COP"),
        };
        item.variants = vec![variant("sold-out", false), variant("in-stock", true)];

        assert_eq!(item.default_variant().map(|v| v.id.as_str()), Some("in-stock"));
    }
}
