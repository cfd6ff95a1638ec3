use std::collections::HashMap;

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};
use uuid::Uuid;

use crate::config::StorefrontConfig;
use crate::domain::payment::{format_price, whatsapp_link};
use crate::repository::ShopifyRepository;
use crate::services::layout::{LayoutData, load_layout};

pub mod api;
pub mod cart;
pub mod catalog;
pub mod main;
pub mod product;

const CART_ID_KEY: &str = "cart_id";
const VISITOR_ID_KEY: &str = "visitor_id";

/// Flash message in the shape the templates render.
#[derive(Debug, Serialize)]
struct Alert {
    level: &'static str,
    message: String,
}

fn alert_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info => "info",
        Level::Debug => "secondary",
    }
}

/// Tera filter rendering a money object or a bare amount in store format.
fn price_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let currency = args
        .get("currency")
        .and_then(tera::Value::as_str)
        .or_else(|| value.get("currency_code").and_then(tera::Value::as_str))
        .unwrap_or("COP");
    let amount = match value.get("amount").unwrap_or(value) {
        tera::Value::String(amount) => amount.trim().parse::<f64>().ok(),
        tera::Value::Number(amount) => amount.as_f64(),
        _ => None,
    };
    match amount {
        Some(amount) => Ok(tera::Value::String(format_price(amount, currency))),
        None => Ok(tera::Value::String(String::new())),
    }
}

/// Parse the templates matching `pattern` and register the storefront filters.
pub fn load_templates(pattern: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(pattern)?;
    tera.register_filter("price", price_filter);
    Ok(tera)
}

/// Id of the visitor's cart kept in the session cookie.
pub fn cart_id(session: &Session) -> Option<String> {
    match session.get::<String>(CART_ID_KEY) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Failed to read cart id from session: {err}");
            None
        }
    }
}

pub fn set_cart_id(session: &Session, cart_id: &str) {
    if let Err(err) = session.insert(CART_ID_KEY, cart_id) {
        log::error!("Failed to store cart id in session: {err}");
    }
}

pub fn forget_cart(session: &Session) {
    session.remove(CART_ID_KEY);
}

/// Id owning the visitor's product feeds, kept in the session cookie.
pub fn visitor_id(session: &Session) -> Option<Uuid> {
    match session.get::<Uuid>(VISITOR_ID_KEY) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Failed to read visitor id from session: {err}");
            None
        }
    }
}

/// Visitor id of the session, assigning a new one on first use.
pub fn ensure_visitor_id(session: &Session) -> Uuid {
    if let Some(id) = visitor_id(session) {
        return id;
    }
    let id = Uuid::new_v4();
    if let Err(err) = session.insert(VISITOR_ID_KEY, id) {
        log::error!("Failed to store visitor id in session: {err}");
    }
    id
}

/// Context shared by every full page: brand identity, navigation, cart
/// badge, flash alerts and contact links.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    layout: &LayoutData,
    config: &StorefrontConfig,
    current_page: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: alert_class(message.level()),
            message: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("store", &config.brand.profile());
    context.insert("menu", &layout.menu);
    context.insert("cart_quantity", &layout.cart_quantity);
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("whatsapp_url", &whatsapp_link(&config.whatsapp_number, None));
    context.insert("banco_bogota_url", &config.banco_bogota_url);
    context.insert("addi_url", &config.addi_url);
    context
}

/// Loads the layout for the visitor and builds the base context. A cart id
/// that no longer resolves is dropped from the session.
pub async fn page_context(
    repo: &ShopifyRepository,
    config: &StorefrontConfig,
    session: &Session,
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
) -> Context {
    let cart_id = cart_id(session);
    let layout = load_layout(repo, &config.main_menu, cart_id.as_deref()).await;
    if layout.stale_cart {
        forget_cart(session);
    }
    base_context(flash_messages, &layout, config, current_page)
}

/// Renders `error.html` with `status`. Falls back to a bare response when the
/// template itself fails.
pub fn render_error(
    tera: &Tera,
    mut context: Context,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    match tera.render("error.html", &context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render error page: {err}");
            HttpResponse::build(status).finish()
        }
    }
}

/// Page shown when the commerce API could not serve a request.
pub fn upstream_error(tera: &Tera, context: Context) -> HttpResponse {
    render_error(
        tera,
        context,
        StatusCode::BAD_GATEWAY,
        "No pudimos cargar la información de la tienda. Intenta de nuevo en unos minutos.",
    )
}

pub fn not_found(tera: &Tera, context: Context) -> HttpResponse {
    render_error(
        tera,
        context,
        StatusCode::NOT_FOUND,
        "La página que buscas no existe.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_filter_formats_money_objects() {
        let rendered = price_filter(
            &json!({ "amount": "1500000.0", "currency_code": "COP" }),
            &HashMap::new(),
        )
        .expect("price");
        assert_eq!(rendered, json!("$ 1.500.000"));
    }

    #[test]
    fn price_filter_accepts_bare_numbers_and_currency_argument() {
        let mut args = HashMap::new();
        args.insert("currency".to_string(), json!("USD"));
        let rendered = price_filter(&json!(12.5), &args).expect("price");
        assert_eq!(rendered, json!("12,50 USD"));
    }

    #[test]
    fn price_filter_leaves_garbage_blank() {
        let rendered = price_filter(&json!({ "amount": "n/a" }), &HashMap::new()).expect("price");
        assert_eq!(rendered, json!(""));
    }
}
