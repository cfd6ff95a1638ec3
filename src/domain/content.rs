use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::product::{Image, Seo};

/// Raw field of a metaobject: a key with a scalar value and/or a reference.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetaobjectField {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub reference: Option<Value>,
}

/// Metaobject fields reduced to a lookup by key. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(HashMap<String, MetaobjectField>);

impl FieldMap {
    pub fn from_fields(fields: Vec<MetaobjectField>) -> Self {
        Self(
            fields
                .into_iter()
                .map(|field| (field.key.clone(), field))
                .collect(),
        )
    }

    /// Scalar value of `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|field| field.value.as_deref())
    }

    /// Referenced object of `key`.
    pub fn reference(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)
            .and_then(|field| field.reference.as_ref())
            .filter(|value| !value.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Product summary carried by promotional content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedProduct {
    pub handle: String,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<Image>,
}

/// Slide of the home page hero or brand banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroItem {
    pub id: String,
    pub image: Option<Image>,
    /// Handle of the product the slide links to.
    pub handle: Option<String>,
}

/// Promotional banner with its featured product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoBanner {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub product: Option<FeaturedProduct>,
}

/// Poster advertising the best-selling product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestProductPoster {
    pub id: String,
    pub product: Option<FeaturedProduct>,
}

/// CMS page managed in the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub handle: String,
    /// HTML body.
    pub body: String,
    pub body_summary: String,
    pub seo: Seo,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(key: &str, value: Option<&str>, reference: Option<Value>) -> MetaobjectField {
        MetaobjectField {
            key: key.to_string(),
            value: value.map(str::to_string),
            reference,
        }
    }

    #[test]
    fn fields_reduce_to_a_flat_lookup() {
        let map = FieldMap::from_fields(vec![
            field("title", Some("Oferta"), None),
            field("product", Some("gid://shopify/Product/1"), Some(json!({"handle": "bafle"}))),
            field("empty", None, Some(Value::Null)),
        ]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.value("title"), Some("Oferta"));
        assert_eq!(
            map.reference("product").and_then(|r| r.get("handle")),
            Some(&json!("bafle"))
        );
        assert_eq!(map.reference("empty"), None);
        assert_eq!(map.value("missing"), None);
    }

    #[test]
    fn later_duplicates_win() {
        let map = FieldMap::from_fields(vec![
            field("title", Some("old"), None),
            field("title", Some("new"), None),
        ]);
        assert_eq!(map.value("title"), Some("new"));
    }
}
