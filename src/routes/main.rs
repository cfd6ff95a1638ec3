use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use pushkind_common::routes::render_template;
use tera::Tera;

use crate::config::StorefrontConfig;
use crate::repository::ShopifyRepository;
use crate::routes::{not_found, page_context, upstream_error};
use crate::services::{ServiceError, content};

#[get("/")]
pub async fn show_index(
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let profile = config.brand.profile();
    let data = content::load_home_page(repo.get_ref(), &profile, &config.main_menu).await;

    let mut context = page_context(&repo, &config, &session, &flash_messages, "index").await;
    context.insert("hero_items", &data.hero_items);
    context.insert("promo_banner", &data.promo_banner);
    context.insert("new_products", &data.new_products);
    context.insert("best_product", &data.best_product);
    context.insert("categories", &data.categories);
    context.insert("brands", &data.brands);
    context.insert("brand_banner", &data.brand_banner);
    render_template(&tera, "main/index.html", &context)
}

#[get("/about-us")]
pub async fn show_about(
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let pages = content::load_about_links(repo.get_ref()).await;

    let mut context = page_context(&repo, &config, &session, &flash_messages, "about").await;
    context.insert("pages", &pages);
    render_template(&tera, "main/about.html", &context)
}

async fn render_page(
    handle: &str,
    repo: &ShopifyRepository,
    config: &StorefrontConfig,
    session: &Session,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    let result = content::load_page(repo, handle).await;
    let mut context = page_context(repo, config, session, flash_messages, "page").await;

    match result {
        Ok(page) => {
            context.insert("page", &page);
            render_template(tera, "main/page.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(tera, context),
        Err(err) => {
            log::error!("Failed to load page {handle}: {err}");
            upstream_error(tera, context)
        }
    }
}

#[get("/pages/{handle}")]
pub async fn show_page(
    handle: web::Path<String>,
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_page(&handle, &repo, &config, &session, &flash_messages, &tera).await
}

/// Menu links drop the `/pages` prefix, so CMS pages also answer at the root.
/// Registered last so that every other route wins.
#[get("/{handle}")]
pub async fn show_root_page(
    handle: web::Path<String>,
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_page(&handle, &repo, &config, &session, &flash_messages, &tera).await
}
