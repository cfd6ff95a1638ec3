use serde::{Deserialize, Serialize};

/// Heading under which brand collections are listed in the main menu.
pub const BRANDS_HEADING: &str = "Marcas";
/// Heading under which category collections are listed. Both spellings occur.
pub const CATEGORY_HEADINGS: [&str; 2] = ["Categorías", "Categorias"];

/// Navigation entry with nested children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    /// Storefront path the entry links to.
    pub path: String,
    pub children: Vec<MenuItem>,
}

/// Collection tile in the category or brand strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub id: String,
    pub title: String,
    pub path: String,
    /// Collection image, when the menu entry references one.
    pub image: Option<String>,
    pub alt_text: Option<String>,
}

/// Category strip and brand strip of the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoriesAndBrands {
    pub categories: Vec<MenuLink>,
    pub brands: Vec<MenuLink>,
}

/// Subcategory entry shown above a category collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub title: String,
    pub path: String,
    pub image: Option<String>,
    pub children: Vec<Subcategory>,
}

/// A category together with its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryGroup {
    pub id: String,
    pub title: String,
    pub children: Vec<Subcategory>,
}

/// Turn a backend menu url into a storefront path.
///
/// The store domain and `/pages` prefix are dropped, the bare collections
/// index becomes `/search` and collection urls move to `/collection/...`.
pub fn storefront_path(url: &str, store_domain: &str) -> String {
    let path = strip_domain(url, store_domain).replace("/pages", "");

    if path == "/collections" {
        "/search".to_string()
    } else {
        path.replace("/collections", "/collection")
    }
}

/// Whether the entry is a grouping heading that should not link anywhere.
pub fn is_group_heading(title: &str) -> bool {
    title == BRANDS_HEADING || title == CATEGORY_HEADINGS[0]
}

fn strip_domain(url: &str, store_domain: &str) -> String {
    let domain = store_domain
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');

    if domain.is_empty() {
        return url.to_string();
    }

    for scheme in ["https://", "http://", ""] {
        let prefix = format!("{scheme}{domain}");
        if let Some(rest) = url.strip_prefix(&prefix) {
            return rest.to_string();
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_urls_become_storefront_paths() {
        assert_eq!(
            storefront_path("https://shop.example.com/collections/dj", "shop.example.com"),
            "/collection/dj"
        );
        assert_eq!(
            storefront_path("https://shop.example.com/collections", "https://shop.example.com"),
            "/search"
        );
    }

    #[test]
    fn page_prefix_is_dropped() {
        assert_eq!(
            storefront_path("https://shop.example.com/pages/about-us", "shop.example.com"),
            "/about-us"
        );
    }

    #[test]
    fn foreign_urls_are_left_alone() {
        assert_eq!(
            storefront_path("https://other.example.com/blog", "shop.example.com"),
            "https://other.example.com/blog"
        );
    }

    #[test]
    fn headings_are_recognised() {
        assert!(is_group_heading("Marcas"));
        assert!(is_group_heading("Categorías"));
        assert!(!is_group_heading("Ofertas"));
    }
}
