//! Filter semantics shared by the in-memory product filter and the
//! backend search query.
//!
//! Every active dimension of a [`FilterSelection`] becomes one
//! [`FilterClause`]. A product is displayed when it satisfies all clauses
//! (AND across dimensions) and a clause with several values is satisfied
//! by any of them (OR within a dimension). The same clauses render to the
//! commerce API search syntax, so the first page fetched from the backend
//! and the locally filtered pages agree.

use serde::Serialize;

use crate::domain::product::Product;

/// One active filter dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Product vendor must be one of the values.
    Brands(Vec<String>),
    /// Product tags must contain at least one of the values.
    Categories(Vec<String>),
    /// Product type must be one of the values.
    Types(Vec<String>),
    /// Max variant price must be at least the bound.
    PriceMin(f64),
    /// Max variant price must be at most the bound.
    PriceMax(f64),
}

impl FilterClause {
    /// Whether `product` satisfies the clause.
    ///
    /// Price clauses let products without a parseable price through.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterClause::Brands(values) => values.iter().any(|value| *value == product.vendor),
            FilterClause::Types(values) => {
                values.iter().any(|value| *value == product.product_type)
            }
            FilterClause::Categories(values) => product
                .tags
                .iter()
                .any(|tag| values.iter().any(|value| value == tag)),
            FilterClause::PriceMin(bound) => {
                product.max_price().is_none_or(|price| price >= *bound)
            }
            FilterClause::PriceMax(bound) => {
                product.max_price().is_none_or(|price| price <= *bound)
            }
        }
    }

    /// Parenthesised clause in the commerce API search syntax.
    pub fn to_search_syntax(&self) -> String {
        match self {
            FilterClause::Brands(values) => any_of("vendor", values),
            FilterClause::Categories(values) => any_of("tag", values),
            FilterClause::Types(values) => any_of("product_type", values),
            FilterClause::PriceMin(bound) => format!("(price:>={})", format_number(*bound)),
            FilterClause::PriceMax(bound) => format!("(price:<={})", format_number(*bound)),
        }
    }
}

/// Filters the visitor currently wants applied, read from the URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSelection {
    /// Selected vendors.
    pub brands: Vec<String>,
    /// Selected tags.
    pub categories: Vec<String>,
    /// Selected product types.
    pub types: Vec<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<f64>,
    /// Inclusive upper price bound.
    pub price_max: Option<f64>,
}

impl FilterSelection {
    /// Whether no dimension is active.
    pub fn is_empty(&self) -> bool {
        self.clauses().is_empty()
    }

    /// Active dimensions in a stable order.
    pub fn clauses(&self) -> Vec<FilterClause> {
        let mut clauses = Vec::new();

        let brands = non_empty_values(&self.brands);
        if !brands.is_empty() {
            clauses.push(FilterClause::Brands(brands));
        }

        let categories = non_empty_values(&self.categories);
        if !categories.is_empty() {
            clauses.push(FilterClause::Categories(categories));
        }

        let types = non_empty_values(&self.types);
        if !types.is_empty() {
            clauses.push(FilterClause::Types(types));
        }

        if let Some(bound) = self.price_min {
            clauses.push(FilterClause::PriceMin(bound));
        }
        if let Some(bound) = self.price_max {
            clauses.push(FilterClause::PriceMax(bound));
        }

        clauses
    }

    /// Whether `product` passes every active clause.
    pub fn matches(&self, product: &Product) -> bool {
        self.clauses().iter().all(|clause| clause.matches(product))
    }

    /// Products from `products` passing the selection, in their original order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let clauses = self.clauses();
        products
            .iter()
            .filter(|product| clauses.iter().all(|clause| clause.matches(product)))
            .collect()
    }

    /// Clauses rendered in search syntax, joined with `AND`. `None` when empty.
    pub fn to_search_syntax(&self) -> Option<String> {
        let clauses: Vec<String> = self
            .clauses()
            .iter()
            .map(FilterClause::to_search_syntax)
            .collect();

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" AND "))
        }
    }
}

fn non_empty_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .collect()
}

fn any_of(field: &str, values: &[String]) -> String {
    let terms: Vec<String> = values
        .iter()
        .map(|value| format!("{field}:'{}'", escape_value(value)))
        .collect();
    format!("({})", terms.join(" OR "))
}

/// Escape a value for use inside a single-quoted search term.
pub fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == '\\' || ch == '\'' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Render a price bound without a trailing `.0` for whole numbers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
