use std::env;

use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;

use pushkind_storefront::config::StorefrontConfig;
use pushkind_storefront::repository::{ShopifyClient, ShopifyRepository};
use pushkind_storefront::routes::api::api_search;
use pushkind_storefront::routes::cart::{add_to_cart, remove_from_cart, show_cart, update_cart};
use pushkind_storefront::routes::catalog::{load_more, show_collection, show_search};
use pushkind_storefront::routes::load_templates;
use pushkind_storefront::routes::main::{show_about, show_index, show_page, show_root_page};
use pushkind_storefront::routes::product::show_product;
use pushkind_storefront::services::feeds::FeedStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    // Cookie keys need at least 64 bytes of secret material.
    let secret_key = match env::var("SECRET_KEY") {
        Ok(key) if key.len() >= 64 => Key::from(key.as_bytes()),
        Ok(_) => {
            log::warn!("SECRET_KEY is shorter than 64 bytes, using a generated key");
            Key::generate()
        }
        Err(_) => Key::generate(),
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let client = match ShopifyClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to build the Storefront API client: {e}");
            std::process::exit(1);
        }
    };
    log::info!(
        "Serving {} from {}",
        config.brand.profile().name,
        client.endpoint()
    );
    let repo = ShopifyRepository::new(client, config.store_domain.clone());
    let feeds = web::Data::new(FeedStore::new(config.feed_capacity));

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match load_templates("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(show_about)
            .service(show_page)
            .service(show_collection)
            .service(show_search)
            .service(load_more)
            .service(show_product)
            .service(show_cart)
            .service(add_to_cart)
            .service(update_cart)
            .service(remove_from_cart)
            .service(api_search)
            .service(show_root_page)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(feeds.clone())
    })
    .bind((address, port))?
    .run()
    .await
}
