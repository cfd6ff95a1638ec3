use serde::Serialize;
use uuid::Uuid;

use crate::domain::facets::FilterFacets;
use crate::domain::feed::{BrowseContext, LoadOutcome, LoaderState, ProductFeed};
use crate::domain::filter::FilterSelection;
use crate::domain::menu::SubcategoryGroup;
use crate::domain::page_info::{PageInfo, PageRequest};
use crate::domain::product::{Product, ProductPage};
use crate::domain::search::build_search_query;
use crate::forms::browse::BrowseQuery;
use crate::repository::product::ALL_PRODUCTS_HANDLE;
use crate::repository::{
    CatalogReader, CollectionProductsQuery, NavigationReader, ProductListQuery, RepositoryResult,
};
use crate::services::feeds::FeedStore;
use crate::services::{ServiceError, ServiceResult};

/// State of a visitor feed as rendered into the results region.
#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub feed_id: Uuid,
    /// Generation the page was rendered with; echoed by load-more requests.
    pub generation: u64,
    /// Page the feed belongs to; filter links are built against it.
    pub path: String,
    /// Loaded products passing the active filters.
    pub products: Vec<Product>,
    pub loaded_count: usize,
    pub facets: FilterFacets,
    pub state: LoaderState,
    pub can_load_more: bool,
    pub page_info: PageInfo,
    /// Message shown instead of the grid when nothing is displayed.
    pub empty_message: Option<String>,
}

/// Data required to render a collection or search page.
#[derive(Debug, Clone)]
pub struct CatalogPageData {
    pub feed: FeedView,
    pub title: String,
    /// Search term echoed back to the view.
    pub term: Option<String>,
    pub subcategories: Option<SubcategoryGroup>,
}

impl FeedView {
    fn new(
        feed_id: Uuid,
        feed: &ProductFeed,
        selection: &FilterSelection,
        term: Option<&str>,
    ) -> Self {
        let products: Vec<Product> = feed.displayed(selection).into_iter().cloned().collect();
        let empty_message = if products.is_empty() {
            Some(empty_message(term, selection))
        } else {
            None
        };

        Self {
            feed_id,
            generation: feed.generation(),
            path: context_path(feed.context()),
            loaded_count: feed.loaded().len(),
            facets: feed.facets().clone(),
            state: feed.state(),
            can_load_more: feed.can_load_more(),
            page_info: feed.page_info().clone(),
            empty_message,
            products,
        }
    }
}

/// Storefront path rendering `context`.
pub fn context_path(context: &BrowseContext) -> String {
    match context {
        BrowseContext::Collection { handle, .. } => format!("/collection/{handle}"),
        BrowseContext::Search { .. } => "/search".to_string(),
    }
}

/// Message telling an empty search apart from filters matching nothing.
pub fn empty_message(term: Option<&str>, selection: &FilterSelection) -> String {
    match term {
        Some(term) => format!("No se encontraron productos para \"{term}\"."),
        None if !selection.is_empty() => {
            "No se encontraron productos con los filtros seleccionados.".to_string()
        }
        None => "No hay productos disponibles por el momento.".to_string(),
    }
}

/// Feed named by the request when it already holds `context` and the request
/// starts from the first page, so filter changes reuse the loaded products.
fn reusable_feed(
    feeds: &FeedStore,
    visitor: Uuid,
    query: &BrowseQuery,
    context: &BrowseContext,
    page: &PageRequest,
) -> Option<(Uuid, ProductFeed)> {
    if !page.is_first_page() {
        return None;
    }
    let id = query.feed_id()?;
    feeds
        .snapshot(visitor, id)
        .filter(|feed| feed.context() == context)
        .map(|feed| (id, feed))
}

async fn fetch_page<R>(
    repo: &R,
    context: &BrowseContext,
    page: PageRequest,
) -> RepositoryResult<ProductPage>
where
    R: CatalogReader + ?Sized,
{
    match context {
        BrowseContext::Collection { handle, sort } => {
            let query = CollectionProductsQuery::new(handle.as_str())
                .sort(*sort)
                .page(page);
            repo.list_collection_products(&query).await
        }
        BrowseContext::Search {
            term,
            selection,
            sort,
        } => {
            let mut query = ProductListQuery::new().sort(*sort).page(page);
            if let Some(search) = build_search_query(term.as_deref(), selection) {
                query = query.search(search);
            }
            repo.list_products(&query).await
        }
    }
}

async fn collection_title<R>(repo: &R, handle: &str) -> String
where
    R: NavigationReader + ?Sized,
{
    if handle == ALL_PRODUCTS_HANDLE {
        return "Todas".to_string();
    }
    match repo.collections().await {
        Ok(collections) => collections
            .into_iter()
            .find(|collection| collection.handle == handle)
            .map(|collection| collection.title)
            .unwrap_or_else(|| handle.to_string()),
        Err(err) => {
            log::warn!("Failed to load collections for {handle}: {err}");
            handle.to_string()
        }
    }
}

/// Loads a collection page. Filters are applied to the loaded products.
pub async fn load_collection_page<R>(
    repo: &R,
    feeds: &FeedStore,
    visitor: Uuid,
    handle: &str,
    query: &BrowseQuery,
    menu_handle: &str,
) -> ServiceResult<CatalogPageData>
where
    R: CatalogReader + NavigationReader + ?Sized,
{
    let selection = query.selection();
    let context = BrowseContext::Collection {
        handle: handle.to_string(),
        sort: query.sort_option(),
    };
    let page = query.page_request();

    let (feed_id, feed) = match reusable_feed(feeds, visitor, query, &context, &page) {
        Some(found) => found,
        None => {
            let initial = fetch_page(repo, &context, page).await?;
            feeds.open(visitor, context, initial, None)
        }
    };

    let subcategories = match repo.subcategories(menu_handle, handle).await {
        Ok(group) => group,
        Err(err) => {
            log::warn!("Failed to load subcategories of {handle}: {err}");
            None
        }
    };
    let title = match subcategories.as_ref() {
        Some(group) => group.title.clone(),
        None => collection_title(repo, handle).await,
    };

    Ok(CatalogPageData {
        feed: FeedView::new(feed_id, &feed, &selection, None),
        title,
        term: None,
        subcategories,
    })
}

/// Loads the search page. Term and filters both go to the backend query;
/// the filter sidebar starts from the catalog-wide filter summary.
pub async fn load_search_page<R>(
    repo: &R,
    feeds: &FeedStore,
    visitor: Uuid,
    query: &BrowseQuery,
) -> ServiceResult<CatalogPageData>
where
    R: CatalogReader + ?Sized,
{
    let term = query.term().map(str::to_string);
    let selection = query.selection();
    let context = BrowseContext::Search {
        term: term.clone(),
        selection: selection.clone(),
        sort: query.sort_option(),
    };
    let page = query.page_request();

    let (feed_id, feed) = match reusable_feed(feeds, visitor, query, &context, &page) {
        Some(found) => found,
        None => {
            let initial = fetch_page(repo, &context, page).await?;
            let seed = match repo.filter_summary().await {
                Ok(summary) => Some(summary),
                Err(err) => {
                    log::warn!("Failed to load the filter summary: {err}");
                    None
                }
            };
            feeds.open(visitor, context, initial, seed)
        }
    };

    let title = match term.as_deref() {
        Some(term) => format!("Resultados para \"{term}\""),
        None => "Todos los productos".to_string(),
    };

    Ok(CatalogPageData {
        feed: FeedView::new(feed_id, &feed, &selection, term.as_deref()),
        title,
        term,
        subcategories: None,
    })
}

/// Appends the next page to the feed named by the request.
///
/// Fails with [`ServiceError::FeedExpired`] when the feed is gone, belongs to
/// someone else, or the request was rendered for another generation. A failed
/// fetch is logged and leaves the feed unchanged so the sentinel can fire again.
pub async fn load_more<R>(
    repo: &R,
    feeds: &FeedStore,
    visitor: Option<Uuid>,
    query: &BrowseQuery,
) -> ServiceResult<FeedView>
where
    R: CatalogReader + ?Sized,
{
    let visitor = visitor.ok_or(ServiceError::FeedExpired)?;
    let feed_id = query.feed_id().ok_or(ServiceError::FeedExpired)?;
    let current = feeds
        .snapshot(visitor, feed_id)
        .ok_or(ServiceError::FeedExpired)?;
    if let Some(generation) = query.generation() {
        if generation != current.generation() {
            return Err(ServiceError::FeedExpired);
        }
    }

    if let Some(ticket) = feeds.begin_load(visitor, feed_id) {
        let page = PageRequest::after(ticket.cursor());
        match fetch_page(repo, ticket.context(), page).await {
            Ok(page) => {
                if feeds.complete_load(visitor, feed_id, &ticket, page) == LoadOutcome::Stale {
                    return Err(ServiceError::FeedExpired);
                }
            }
            Err(err) => {
                log::warn!("Failed to load more products: {err}");
                feeds.abort_load(visitor, feed_id, &ticket);
            }
        }
    }

    let feed = feeds
        .snapshot(visitor, feed_id)
        .ok_or(ServiceError::FeedExpired)?;
    let term = match feed.context() {
        BrowseContext::Search { term, .. } => term.clone(),
        BrowseContext::Collection { .. } => None,
    };
    Ok(FeedView::new(feed_id, &feed, &query.selection(), term.as_deref()))
}
