use serde::Deserialize;
use serde_json::json;

use crate::domain::collection::Collection as DomainCollection;
use crate::domain::menu::{CategoriesAndBrands, MenuItem, SubcategoryGroup};
use crate::models::Connection;
use crate::models::collection::{Collection, into_navigation as collections_navigation};
use crate::models::menu::{Menu, categories_and_brands, into_navigation, subcategories};
use crate::repository::queries::{COLLECTIONS_QUERY, MENU_QUERY};
use crate::repository::{NavigationReader, RepositoryResult, ShopifyRepository};

#[derive(Deserialize)]
struct MenuData {
    menu: Option<Menu>,
}

#[derive(Deserialize)]
struct CollectionsData {
    collections: Connection<Collection>,
}

impl ShopifyRepository {
    async fn fetch_menu(&self, handle: &str) -> RepositoryResult<Menu> {
        let data: MenuData = self
            .client()
            .execute(MENU_QUERY, json!({ "handle": handle }))
            .await?;
        Ok(data.menu.unwrap_or_default())
    }
}

impl NavigationReader for ShopifyRepository {
    async fn menu(&self, handle: &str) -> RepositoryResult<Vec<MenuItem>> {
        let menu = self.fetch_menu(handle).await?;
        Ok(into_navigation(menu, self.store_domain()))
    }

    async fn categories_and_brands(
        &self,
        menu_handle: &str,
    ) -> RepositoryResult<CategoriesAndBrands> {
        let menu = self.fetch_menu(menu_handle).await?;
        Ok(categories_and_brands(&menu, self.store_domain()))
    }

    async fn subcategories(
        &self,
        menu_handle: &str,
        collection_handle: &str,
    ) -> RepositoryResult<Option<SubcategoryGroup>> {
        let menu = self.fetch_menu(menu_handle).await?;
        Ok(subcategories(&menu, collection_handle, self.store_domain()))
    }

    async fn collections(&self) -> RepositoryResult<Vec<DomainCollection>> {
        let data: CollectionsData = self.client().execute(COLLECTIONS_QUERY, json!({})).await?;
        Ok(collections_navigation(data.collections.into_nodes()))
    }
}
