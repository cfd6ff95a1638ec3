//! Filter values offered by the loaded products, grown page by page.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::product::Product;

/// Observed price interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    fn widen(self, price: f64) -> Self {
        Self {
            min: self.min.min(price),
            max: self.max.max(price),
        }
    }
}

/// Filter values available in the sidebar.
///
/// Derived from every loaded product, never from the filtered subset, and
/// only ever grows within one browsing context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterFacets {
    /// Distinct vendors.
    pub brands: BTreeSet<String>,
    /// Distinct tags.
    pub categories: BTreeSet<String>,
    /// Distinct product types.
    pub types: BTreeSet<String>,
    /// Range of max variant prices, `None` until a priced product is seen.
    pub price_range: Option<PriceBounds>,
}

impl FilterFacets {
    /// Facets of `products` computed in one pass.
    pub fn from_products(products: &[Product]) -> Self {
        let mut facets = Self::default();
        facets.absorb(products);
        facets
    }

    /// Grow the facets with newly loaded products.
    pub fn absorb(&mut self, products: &[Product]) {
        for product in products {
            if !product.vendor.is_empty() {
                self.brands.insert(product.vendor.clone());
            }
            if !product.product_type.is_empty() {
                self.types.insert(product.product_type.clone());
            }
            for tag in &product.tags {
                if !tag.is_empty() {
                    self.categories.insert(tag.clone());
                }
            }
            if let Some(price) = product.max_price() {
                self.include_price(price);
            }
        }
    }

    /// Merge another facet set into this one.
    pub fn merge(&mut self, other: FilterFacets) {
        self.brands.extend(other.brands);
        self.categories.extend(other.categories);
        self.types.extend(other.types);
        if let Some(bounds) = other.price_range {
            self.include_price(bounds.min);
            self.include_price(bounds.max);
        }
    }

    /// Widen the price range to cover `price`.
    pub fn include_price(&mut self, price: f64) {
        self.price_range = Some(match self.price_range {
            Some(bounds) => bounds.widen(price),
            None => PriceBounds {
                min: price,
                max: price,
            },
        });
    }

    /// Whether `other` holds every value of `self`.
    pub fn is_subset_of(&self, other: &FilterFacets) -> bool {
        let prices_covered = match (self.price_range, other.price_range) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(inner), Some(outer)) => outer.min <= inner.min && inner.max <= outer.max,
        };
        self.brands.is_subset(&other.brands)
            && self.categories.is_subset(&other.categories)
            && self.types.is_subset(&other.types)
            && prices_covered
    }

    /// Price range reported to templates, `0..0` when unknown.
    pub fn price_bounds(&self) -> PriceBounds {
        self.price_range.unwrap_or_default()
    }
}
