#![allow(async_fn_in_trait)]

use crate::domain::cart::{Cart, CartLineInput, CartLineUpdate};
use crate::domain::collection::Collection;
use crate::domain::content::{BestProductPoster, HeroItem, Page, PromoBanner};
use crate::domain::facets::FilterFacets;
use crate::domain::menu::{CategoriesAndBrands, MenuItem, SubcategoryGroup};
use crate::domain::page_info::PageRequest;
use crate::domain::product::{Product, ProductPage};
use crate::domain::sort::{SortOption, default_sort};

pub mod cart;
pub mod client;
pub mod content;
pub mod errors;
pub mod navigation;
pub mod product;
pub mod queries;

#[cfg(test)]
pub mod fake;

pub use client::ShopifyClient;
pub use errors::{RepositoryResult, ShopifyError};

#[derive(Debug, Clone)]
/// Storefront API backed repository. Cloning shares the HTTP connection pool.
pub struct ShopifyRepository {
    client: ShopifyClient,
    store_domain: String,
}

impl ShopifyRepository {
    pub fn new(client: ShopifyClient, store_domain: impl Into<String>) -> Self {
        Self {
            client,
            store_domain: store_domain.into(),
        }
    }

    fn client(&self) -> &ShopifyClient {
        &self.client
    }

    fn store_domain(&self) -> &str {
        &self.store_domain
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Query over the whole catalog: search string, sort and page.
pub struct ProductListQuery {
    pub search: Option<String>,
    pub sort: &'static SortOption,
    pub page: PageRequest,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    /// First page of the whole catalog in default order.
    pub fn new() -> Self {
        Self {
            search: None,
            sort: default_sort(),
            page: PageRequest::first_page(),
        }
    }

    /// Restrict the results with a search-syntax query.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn sort(mut self, sort: &'static SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Query over the products of one collection.
pub struct CollectionProductsQuery {
    pub handle: String,
    pub sort: &'static SortOption,
    pub page: PageRequest,
}

impl CollectionProductsQuery {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            sort: default_sort(),
            page: PageRequest::first_page(),
        }
    }

    pub fn sort(mut self, sort: &'static SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// Read-only operations over catalog products.
pub trait CatalogReader {
    async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage>;
    /// Products of a collection; an unknown collection yields an empty, exhausted page.
    async fn list_collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> RepositoryResult<ProductPage>;
    /// Product by handle, hidden products included.
    async fn get_product(&self, handle: &str) -> RepositoryResult<Option<Product>>;
    async fn product_recommendations(&self, product_id: &str) -> RepositoryResult<Vec<Product>>;
    async fn new_products(&self) -> RepositoryResult<Vec<Product>>;
    /// Search-as-you-type results for `term`.
    async fn predictive_search(&self, term: &str) -> RepositoryResult<Vec<Product>>;
    /// Catalog-wide filter values.
    async fn filter_summary(&self) -> RepositoryResult<FilterFacets>;
}

/// Menus and collections used for navigation.
pub trait NavigationReader {
    async fn menu(&self, handle: &str) -> RepositoryResult<Vec<MenuItem>>;
    async fn categories_and_brands(&self, menu_handle: &str)
    -> RepositoryResult<CategoriesAndBrands>;
    async fn subcategories(
        &self,
        menu_handle: &str,
        collection_handle: &str,
    ) -> RepositoryResult<Option<SubcategoryGroup>>;
    async fn collections(&self) -> RepositoryResult<Vec<Collection>>;
}

/// Marketing content and CMS pages.
pub trait ContentReader {
    async fn page(&self, handle: &str) -> RepositoryResult<Option<Page>>;
    async fn pages(&self) -> RepositoryResult<Vec<Page>>;
    async fn hero_items(&self, metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>>;
    async fn brand_banner(&self, metaobject_type: &str) -> RepositoryResult<Vec<HeroItem>>;
    async fn promo_banner(&self, metaobject_type: &str) -> RepositoryResult<Option<PromoBanner>>;
    async fn best_product_poster(
        &self,
        metaobject_type: &str,
    ) -> RepositoryResult<Option<BestProductPoster>>;
}

pub trait CartReader {
    /// Cart by id, `None` when it no longer exists.
    async fn get_cart(&self, cart_id: &str) -> RepositoryResult<Option<Cart>>;
}

pub trait CartWriter {
    async fn create_cart(&self) -> RepositoryResult<Cart>;
    async fn add_to_cart(&self, cart_id: &str, lines: &[CartLineInput]) -> RepositoryResult<Cart>;
    async fn update_cart(&self, cart_id: &str, lines: &[CartLineUpdate])
    -> RepositoryResult<Cart>;
    async fn remove_from_cart(&self, cart_id: &str, line_ids: &[String])
    -> RepositoryResult<Cart>;
}
