use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::product::Seo;

/// Product collection listed in the catalog navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub seo: Seo,
    /// Storefront path of the collection.
    pub path: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Collection {
    /// Entry representing the whole catalog.
    pub fn all_products() -> Self {
        Self {
            handle: String::new(),
            title: "Todas".to_string(),
            description: "All products".to_string(),
            seo: Seo {
                title: Some("Todas".to_string()),
                description: Some("All products".to_string()),
            },
            path: "/search".to_string(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Collections whose handle starts with `hidden` stay out of navigation.
    pub fn is_hidden(&self) -> bool {
        self.handle.starts_with("hidden")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_collections_are_detected() {
        let mut collection = Collection::all_products();
        assert!(!collection.is_hidden());
        collection.handle = "hidden-homepage".to_string();
        assert!(collection.is_hidden());
    }
}
