use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::collection::Collection as DomainCollection;
use crate::domain::product::Seo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Collection> for DomainCollection {
    fn from(value: Collection) -> Self {
        Self {
            path: format!("/collection/{}", value.handle),
            handle: value.handle,
            title: value.title,
            description: value.description,
            seo: value.seo.unwrap_or_default(),
            updated_at: value.updated_at,
        }
    }
}

/// Navigation collections: the whole-catalog entry first, hidden ones dropped.
pub fn into_navigation(collections: Vec<Collection>) -> Vec<DomainCollection> {
    std::iter::once(DomainCollection::all_products())
        .chain(
            collections
                .into_iter()
                .map(DomainCollection::from)
                .filter(|collection| !collection.is_hidden()),
        )
        .collect()
}
