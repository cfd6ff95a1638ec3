use serde::Deserialize;

use crate::domain::facets::FilterFacets;
use crate::models::Connection;

#[derive(Debug, Clone, Deserialize)]
pub struct Amount {
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub min_variant_price: Amount,
    pub max_variant_price: Amount,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(default)]
    pub vendor: String,
    pub price_range: PriceSummary,
}

/// Catalog-wide filter values: product types, tags, and vendor and price of
/// the first products.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    #[serde(default)]
    pub product_types: Connection<String>,
    #[serde(default)]
    pub product_tags: Connection<String>,
    #[serde(default)]
    pub products: Connection<ProductSummary>,
}

impl From<FilterSummary> for FilterFacets {
    fn from(value: FilterSummary) -> Self {
        let mut facets = FilterFacets::default();

        facets.types.extend(
            value
                .product_types
                .into_nodes()
                .into_iter()
                .filter(|value| !value.is_empty()),
        );
        facets.categories.extend(
            value
                .product_tags
                .into_nodes()
                .into_iter()
                .filter(|value| !value.is_empty()),
        );

        for product in value.products.into_nodes() {
            if !product.vendor.is_empty() {
                facets.brands.insert(product.vendor);
            }
            if let Ok(price) = product.price_range.max_variant_price.amount.trim().parse::<f64>() {
                if price.is_finite() {
                    facets.include_price(price);
                }
            }
        }

        facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_becomes_facets() {
        let summary: FilterSummary = serde_json::from_value(json!({
            "productTypes": {"edges": [{"node": "Parlante"}, {"node": ""}]},
            "productTags": {"edges": [{"node": "DJ"}]},
            "products": {"edges": [
                {"node": {"vendor": "JBL", "priceRange": {
                    "minVariantPrice": {"amount": "10"}, "maxVariantPrice": {"amount": "90"}}}},
                {"node": {"vendor": "Pioneer", "priceRange": {
                    "minVariantPrice": {"amount": "5"}, "maxVariantPrice": {"amount": "300"}}}}
            ]}
        }))
        .expect("summary");

        let facets = FilterFacets::from(summary);

        assert_eq!(facets.types.len(), 1);
        assert!(facets.categories.contains("DJ"));
        assert!(facets.brands.contains("Pioneer"));
        assert_eq!(facets.price_bounds().min, 90.0);
        assert_eq!(facets.price_bounds().max, 300.0);
    }
}
