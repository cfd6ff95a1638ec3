use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::routes::render_template;
use tera::{Context, Tera};

use crate::config::StorefrontConfig;
use crate::forms::browse::BrowseQuery;
use crate::repository::ShopifyRepository;
use crate::routes::{ensure_visitor_id, page_context, upstream_error, visitor_id};
use crate::services::catalog::{self, CatalogPageData, FeedView};
use crate::services::ServiceError;
use crate::services::feeds::FeedStore;

fn browse_query(req: &HttpRequest) -> BrowseQuery {
    match BrowseQuery::parse(req.query_string()) {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Ignoring malformed catalog query: {err}");
            BrowseQuery::default()
        }
    }
}

/// Url the load-more sentinel requests, carrying the filters, the feed and
/// the generation the page was rendered with.
fn more_url(query: &BrowseQuery, generation: u64) -> String {
    let filters = query.filter_query();
    if filters.is_empty() {
        format!("/feed/more?generation={generation}")
    } else {
        format!("/feed/more?{filters}&generation={generation}")
    }
}

/// Everything `catalog/_results.html` renders.
fn insert_results(context: &mut Context, query: &BrowseQuery, feed: &FeedView) {
    let linked = query.with_feed(feed.feed_id);
    context.insert("feed", feed);
    context.insert("filters", &linked.filter_panel(&feed.path, &feed.facets));
    context.insert("more_url", &more_url(&linked, feed.generation));
    context.insert("query_term", &linked.term());
    context.insert("sort_slug", &linked.sort_option().slug);
}

async fn render_catalog_page(
    result: Result<CatalogPageData, ServiceError>,
    template: &str,
    query: &BrowseQuery,
    repo: &ShopifyRepository,
    config: &StorefrontConfig,
    session: &Session,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    let mut context = page_context(repo, config, session, flash_messages, "catalog").await;
    match result {
        Ok(data) => {
            insert_results(&mut context, query, &data.feed);
            context.insert("title", &data.title);
            context.insert("term", &data.term);
            context.insert("subcategories", &data.subcategories);
            render_template(tera, template, &context)
        }
        Err(err) => {
            log::error!("Failed to load catalog page: {err}");
            upstream_error(tera, context)
        }
    }
}

#[get("/collection/{handle}")]
pub async fn show_collection(
    req: HttpRequest,
    handle: web::Path<String>,
    repo: web::Data<ShopifyRepository>,
    feeds: web::Data<FeedStore>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = browse_query(&req);
    let result = catalog::load_collection_page(
        repo.get_ref(),
        feeds.get_ref(),
        ensure_visitor_id(&session),
        &handle,
        &query,
        &config.main_menu,
    )
    .await;

    render_catalog_page(
        result,
        "catalog/collection.html",
        &query,
        &repo,
        &config,
        &session,
        &flash_messages,
        &tera,
    )
    .await
}

#[get("/search")]
pub async fn show_search(
    req: HttpRequest,
    repo: web::Data<ShopifyRepository>,
    feeds: web::Data<FeedStore>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = browse_query(&req);
    let visitor = ensure_visitor_id(&session);
    let result = catalog::load_search_page(repo.get_ref(), feeds.get_ref(), visitor, &query).await;

    render_catalog_page(
        result,
        "catalog/search.html",
        &query,
        &repo,
        &config,
        &session,
        &flash_messages,
        &tera,
    )
    .await
}

/// Next page of the visitor's feed as a results fragment. Answers
/// `410 Gone` when the page that asked is out of date, so it reloads.
#[get("/feed/more")]
pub async fn load_more(
    req: HttpRequest,
    repo: web::Data<ShopifyRepository>,
    feeds: web::Data<FeedStore>,
    session: Session,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = browse_query(&req);
    let visitor = visitor_id(&session);
    match catalog::load_more(repo.get_ref(), feeds.get_ref(), visitor, &query).await {
        Ok(feed) => {
            let mut context = Context::new();
            insert_results(&mut context, &query, &feed);
            render_template(&tera, "catalog/_results.html", &context)
        }
        Err(ServiceError::FeedExpired) => HttpResponse::Gone().finish(),
        Err(err) => {
            log::error!("Failed to load more products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn more_url_keeps_filters_feed_and_generation() {
        let feed = Uuid::parse_str("0b5e8f5c-1d2a-4c3b-9e4f-5a6b7c8d9e0f").expect("uuid");
        let query = BrowseQuery::parse("brands=JBL&after=abc&sort=price-asc")
            .expect("query")
            .with_feed(feed);
        assert_eq!(
            more_url(&query, 3),
            format!("/feed/more?brands=JBL&sort=price-asc&feed={feed}&generation=3")
        );
        assert_eq!(more_url(&BrowseQuery::default(), 0), "/feed/more?generation=0");
    }
}
