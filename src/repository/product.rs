use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::domain::facets::FilterFacets;
use crate::domain::page_info::PageRequest;
use crate::domain::product::{Product as DomainProduct, ProductPage};
use crate::domain::search::{PREDICTIVE_RESULTS, text_clause};
use crate::models::Connection;
use crate::models::filters::FilterSummary;
use crate::models::product::{Product, into_product_page, into_visible_products};
use crate::repository::queries::{
    COLLECTION_PRODUCTS_QUERY, FILTER_SUMMARY_QUERY, NEW_PRODUCTS_QUERY, PRODUCT_QUERY,
    PRODUCT_RECOMMENDATIONS_QUERY, PRODUCTS_QUERY,
};
use crate::repository::{
    CatalogReader, CollectionProductsQuery, ProductListQuery, RepositoryResult, ShopifyRepository,
};

/// Collection handle standing for the whole catalog.
pub const ALL_PRODUCTS_HANDLE: &str = "all";

#[derive(Deserialize)]
struct ProductsData {
    products: Connection<Product>,
}

#[derive(Deserialize)]
struct CollectionProducts {
    products: Connection<Product>,
}

#[derive(Deserialize)]
struct CollectionProductsData {
    collection: Option<CollectionProducts>,
}

#[derive(Deserialize)]
struct ProductData {
    product: Option<Product>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsData {
    product_recommendations: Option<Vec<Product>>,
}

/// `first`/`after` or `last`/`before`, never both directions.
fn page_variables(page: &PageRequest, variables: &mut Map<String, Value>) {
    let (first, after, last, before) = page.variables();
    if let Some(first) = first {
        variables.insert("first".into(), json!(first));
    }
    if let Some(after) = after {
        variables.insert("after".into(), json!(after));
    }
    if let Some(last) = last {
        variables.insert("last".into(), json!(last));
    }
    if let Some(before) = before {
        variables.insert("before".into(), json!(before));
    }
}

/// Variables of the `products` query.
pub fn products_variables(query: &ProductListQuery) -> Value {
    let mut variables = Map::new();
    if let Some(search) = query.search.as_deref().filter(|search| !search.is_empty()) {
        variables.insert("query".into(), json!(search));
    }
    variables.insert("sortKey".into(), json!(query.sort.sort_key.product_key()));
    variables.insert("reverse".into(), json!(query.sort.reverse));
    page_variables(&query.page, &mut variables);
    Value::Object(variables)
}

/// Variables of the `collection.products` query.
pub fn collection_variables(query: &CollectionProductsQuery) -> Value {
    let mut variables = Map::new();
    variables.insert("handle".into(), json!(query.handle));
    variables.insert("sortKey".into(), json!(query.sort.sort_key.collection_key()));
    variables.insert("reverse".into(), json!(query.sort.reverse));
    page_variables(&query.page, &mut variables);
    Value::Object(variables)
}

impl CatalogReader for ShopifyRepository {
    async fn list_products(&self, query: &ProductListQuery) -> RepositoryResult<ProductPage> {
        let data: ProductsData = self
            .client()
            .execute(PRODUCTS_QUERY, products_variables(query))
            .await?;
        Ok(into_product_page(data.products))
    }

    async fn list_collection_products(
        &self,
        query: &CollectionProductsQuery,
    ) -> RepositoryResult<ProductPage> {
        if query.handle == ALL_PRODUCTS_HANDLE {
            let catalog = ProductListQuery::new()
                .sort(query.sort)
                .page(query.page.clone());
            return self.list_products(&catalog).await;
        }

        let data: CollectionProductsData = self
            .client()
            .execute(COLLECTION_PRODUCTS_QUERY, collection_variables(query))
            .await?;

        match data.collection {
            Some(collection) => Ok(into_product_page(collection.products)),
            None => {
                log::info!("Collection `{}` not found", query.handle);
                Ok(ProductPage::empty())
            }
        }
    }

    async fn get_product(&self, handle: &str) -> RepositoryResult<Option<DomainProduct>> {
        let data: ProductData = self
            .client()
            .execute(PRODUCT_QUERY, json!({ "handle": handle }))
            .await?;
        Ok(data.product.map(DomainProduct::from))
    }

    async fn product_recommendations(
        &self,
        product_id: &str,
    ) -> RepositoryResult<Vec<DomainProduct>> {
        let data: RecommendationsData = self
            .client()
            .execute(PRODUCT_RECOMMENDATIONS_QUERY, json!({ "productId": product_id }))
            .await?;
        Ok(into_visible_products(
            data.product_recommendations.unwrap_or_default(),
        ))
    }

    async fn new_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        let data: ProductsData = self.client().execute(NEW_PRODUCTS_QUERY, json!({})).await?;
        Ok(into_visible_products(data.products.into_nodes()))
    }

    async fn predictive_search(&self, term: &str) -> RepositoryResult<Vec<DomainProduct>> {
        let Some(query) = text_clause(term) else {
            return Ok(Vec::new());
        };
        let data: ProductsData = self
            .client()
            .execute(
                PRODUCTS_QUERY,
                json!({ "query": query, "first": PREDICTIVE_RESULTS }),
            )
            .await?;
        Ok(into_visible_products(data.products.into_nodes()))
    }

    async fn filter_summary(&self) -> RepositoryResult<FilterFacets> {
        let summary: FilterSummary = self
            .client()
            .execute(FILTER_SUMMARY_QUERY, json!({}))
            .await?;
        Ok(FilterFacets::from(summary))
    }
}
