use serde::Deserialize;
use serde_json::json;

use crate::domain::content::{BestProductPoster, HeroItem, Page as DomainPage, PromoBanner};
use crate::models::Connection;
use crate::models::content::{Metaobject, Page, best_product_poster, hero_item, promo_banner};
use crate::repository::queries::{METAOBJECTS_QUERY, PAGE_QUERY, PAGES_QUERY};
use crate::repository::{ContentReader, RepositoryResult, ShopifyRepository};

const HERO_ITEMS: usize = 10;

#[derive(Deserialize)]
struct MetaobjectsData {
    metaobjects: Connection<Metaobject>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageData {
    page_by_handle: Option<Page>,
}

#[derive(Deserialize)]
struct PagesData {
    pages: Connection<Page>,
}

impl ShopifyRepository {
    async fn metaobjects(
        &self,
        metaobject_type: &str,
        first: usize,
        reverse: bool,
    ) -> RepositoryResult<Vec<Metaobject>> {
        let data: MetaobjectsData = self
            .client()
            .execute(
                METAOBJECTS_QUERY,
                json!({ "type": metaobject_type, "first": first, "reverse": reverse }),
            )
            .await?;
        Ok(data.metaobjects.into_nodes())
    }
}

impl ContentReader for ShopifyRepository {
    async fn page(&self, handle: &str) -> RepositoryResult<Option<DomainPage>> {
        let data: PageData = self
            .client()
            .execute(PAGE_QUERY, json!({ "handle": handle }))
            .await?;
        Ok(data.page_by_handle.map(DomainPage::from))
    }

    async fn pages(&self) -> RepositoryResult<Vec<DomainPage>> {
        let data: PagesData = self.client().execute(PAGES_QUERY, json!({})).await?;
        Ok(data
            .pages
            .into_nodes()
            .into_iter()
            .map(DomainPage::from)
            .collect())
    }

    async fn hero_items(&self, metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>> {
        let nodes = self.metaobjects(metaobject_type, HERO_ITEMS, false).await?;
        Ok(nodes
            .into_iter()
            .map(|node| hero_item(node, "image", "product_selected"))
            .collect())
    }

    async fn brand_banner(&self, metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>> {
        let nodes = self.metaobjects(metaobject_type, HERO_ITEMS, false).await?;
        Ok(nodes
            .into_iter()
            .map(|node| hero_item(node, "imagen", "producto"))
            .collect())
    }

    async fn promo_banner(&self, metaobject_type: &str) -> RepositoryResult<Option<PromoBanner>> {
        let nodes = self.metaobjects(metaobject_type, 1, false).await?;
        Ok(nodes.into_iter().next().map(promo_banner))
    }

    async fn best_product_poster(
        &self,
        metaobject_type: &str,
    ) -> RepositoryResult<Option<BestProductPoster>> {
        let nodes = self.metaobjects(metaobject_type, 1, true).await?;
        Ok(nodes.into_iter().next().map(best_product_poster))
    }
}
