use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

/// Sort keys understood by the commerce API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortKey {
    Relevance,
    BestSelling,
    CreatedAt,
    Price,
    Title,
}

impl SortKey {
    /// Key for the top-level `products` connection.
    pub fn product_key(self) -> &'static str {
        match self {
            SortKey::Relevance => "RELEVANCE",
            SortKey::BestSelling => "BEST_SELLING",
            SortKey::CreatedAt => "CREATED_AT",
            SortKey::Price => "PRICE",
            SortKey::Title => "TITLE",
        }
    }

    /// Key for `collection.products`, which names creation order `CREATED`.
    pub fn collection_key(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "CREATED",
            other => other.product_key(),
        }
    }
}

/// Entry of the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortOption {
    /// Label shown in the menu.
    pub title: &'static str,
    /// Value of the `sort` query parameter, `None` for the default.
    pub slug: Option<&'static str>,
    /// Backend sort key.
    pub sort_key: SortKey,
    /// Whether the order is descending.
    pub reverse: bool,
}

/// Every sort the storefront offers, default first.
pub static SORT_OPTIONS: [SortOption; 7] = [
    SortOption {
        title: "Relevancia",
        slug: None,
        sort_key: SortKey::Relevance,
        reverse: false,
    },
    SortOption {
        title: "Más vendidos",
        slug: Some("trending-desc"),
        sort_key: SortKey::BestSelling,
        reverse: false,
    },
    SortOption {
        title: "Más recientes",
        slug: Some("latest-desc"),
        sort_key: SortKey::CreatedAt,
        reverse: true,
    },
    SortOption {
        title: "Precio: menor a mayor",
        slug: Some("price-asc"),
        sort_key: SortKey::Price,
        reverse: false,
    },
    SortOption {
        title: "Precio: mayor a menor",
        slug: Some("price-desc"),
        sort_key: SortKey::Price,
        reverse: true,
    },
    SortOption {
        title: "Nombre: A-Z",
        slug: Some("title-asc"),
        sort_key: SortKey::Title,
        reverse: false,
    },
    SortOption {
        title: "Nombre: Z-A",
        slug: Some("title-desc"),
        sort_key: SortKey::Title,
        reverse: true,
    },
];

lazy_static! {
    static ref SORT_BY_SLUG: HashMap<&'static str, &'static SortOption> = SORT_OPTIONS
        .iter()
        .filter_map(|option| option.slug.map(|slug| (slug, option)))
        .collect();
}

/// Sort applied when the request names none or an unknown one.
pub fn default_sort() -> &'static SortOption {
    &SORT_OPTIONS[0]
}

/// Resolve a `sort` query parameter, falling back to the default.
pub fn resolve_sort(slug: Option<&str>) -> &'static SortOption {
    slug.and_then(|slug| SORT_BY_SLUG.get(slug).copied())
        .unwrap_or_else(default_sort)
}
