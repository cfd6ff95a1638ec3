use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::content::{
    BestProductPoster, FeaturedProduct, FieldMap, HeroItem, MetaobjectField, Page as DomainPage,
    PromoBanner,
};
use crate::domain::product::{Image as DomainImage, Seo};
use crate::models::Connection;
use crate::models::product::Image;

#[derive(Debug, Clone, Deserialize)]
pub struct Metaobject {
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub fields: Vec<MetaobjectField>,
}

impl Metaobject {
    pub fn field_map(self) -> (String, FieldMap) {
        (self.id, FieldMap::from_fields(self.fields))
    }
}

/// `MediaImage` reference.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaImage {
    #[serde(default)]
    pub image: Option<Image>,
}

/// `Product` reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReference {
    pub handle: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured_image: Option<Image>,
    #[serde(default)]
    pub images: Connection<Image>,
}

impl From<ProductReference> for FeaturedProduct {
    fn from(value: ProductReference) -> Self {
        let label = value.title.clone().unwrap_or_else(|| value.handle.clone());
        let image = value
            .featured_image
            .or_else(|| value.images.into_nodes().into_iter().next())
            .map(|image| image.into_domain(&label));
        Self {
            handle: value.handle,
            title: value.title,
            tags: value.tags,
            image,
        }
    }
}

/// Typed view of the reference stored under `key`.
fn reference<T: DeserializeOwned>(fields: &FieldMap, key: &str) -> Option<T> {
    fields
        .reference(key)
        .cloned()
        .and_then(|value: Value| serde_json::from_value(value).ok())
}

fn image_reference(fields: &FieldMap, key: &str) -> Option<DomainImage> {
    reference::<MediaImage>(fields, key)
        .and_then(|media| media.image)
        .map(|image| image.into_domain(key))
}

/// Slide with an image under `image_key` and a product under `product_key`.
pub fn hero_item(metaobject: Metaobject, image_key: &str, product_key: &str) -> HeroItem {
    let (id, fields) = metaobject.field_map();
    HeroItem {
        id,
        image: image_reference(&fields, image_key),
        handle: reference::<ProductReference>(&fields, product_key).map(|product| product.handle),
    }
}

pub fn promo_banner(metaobject: Metaobject) -> PromoBanner {
    let (id, fields) = metaobject.field_map();
    PromoBanner {
        id,
        title: fields.value("title").map(str::to_string),
        description: fields.value("description").map(str::to_string),
        product: reference::<ProductReference>(&fields, "product_promo_banner")
            .map(FeaturedProduct::from),
    }
}

pub fn best_product_poster(metaobject: Metaobject) -> BestProductPoster {
    let (id, fields) = metaobject.field_map();
    BestProductPoster {
        id,
        product: reference::<ProductReference>(&fields, "product").map(FeaturedProduct::from),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub body_summary: String,
    #[serde(default)]
    pub seo: Option<Seo>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Page> for DomainPage {
    fn from(value: Page) -> Self {
        Self {
            id: value.id,
            title: value.title,
            handle: value.handle,
            body: value.body,
            body_summary: value.body_summary,
            seo: value.seo.unwrap_or_default(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
