use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Utc;
use pushkind_common::routes::render_template;
use tera::Tera;

use crate::config::StorefrontConfig;
use crate::repository::ShopifyRepository;
use crate::routes::{not_found, page_context, upstream_error};
use crate::services::{ServiceError, product};

#[get("/product/{handle}")]
pub async fn show_product(
    handle: web::Path<String>,
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result =
        product::load_product_page(repo.get_ref(), &handle, &config.whatsapp_number, Utc::now())
            .await;
    let mut context = page_context(&repo, &config, &session, &flash_messages, "product").await;

    match result {
        Ok(data) => {
            context.insert("product", &data.product);
            context.insert("variant", &data.product.default_variant());
            context.insert("recommendations", &data.recommendations);
            context.insert("payment", &data.payment);
            context.insert("enquiry_url", &data.enquiry_url);
            render_template(&tera, "product/show.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, context),
        Err(err) => {
            log::error!("Failed to load product {handle}: {err}");
            upstream_error(&tera, context)
        }
    }
}
