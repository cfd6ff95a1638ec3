use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::routes::{redirect, render_template};
use tera::Tera;

use crate::config::StorefrontConfig;
use crate::forms::cart::{AddToCartForm, RemoveCartLineForm, UpdateCartLineForm};
use crate::repository::ShopifyRepository;
use crate::routes::{cart_id, forget_cart, page_context, set_cart_id, upstream_error};
use crate::services::{ServiceError, cart};

#[get("/cart")]
pub async fn show_cart(
    repo: web::Data<ShopifyRepository>,
    config: web::Data<StorefrontConfig>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let current = cart_id(&session);
    let result = cart::load_cart(repo.get_ref(), current.as_deref()).await;
    let mut context = page_context(&repo, &config, &session, &flash_messages, "cart").await;

    match result {
        Ok(found) => {
            if found.is_none() && current.is_some() {
                forget_cart(&session);
            }
            context.insert("cart", &found);
            render_template(&tera, "cart/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            upstream_error(&tera, context)
        }
    }
}

#[post("/cart/add")]
pub async fn add_to_cart(
    repo: web::Data<ShopifyRepository>,
    session: Session,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let return_to = form.return_path();
    let current = cart_id(&session);

    match cart::add_to_cart(repo.get_ref(), current.as_deref(), form).await {
        Ok(updated) => {
            set_cart_id(&session, &updated.id);
            FlashMessage::success("Producto agregado al carrito.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("No se pudo agregar el producto: {message}")).send();
        }
        Err(err) => {
            log::error!("Failed to add to cart: {err}");
            FlashMessage::error("No se pudo agregar el producto al carrito.").send();
        }
    }
    redirect(&return_to)
}

#[post("/cart/update")]
pub async fn update_cart(
    repo: web::Data<ShopifyRepository>,
    session: Session,
    web::Form(form): web::Form<UpdateCartLineForm>,
) -> impl Responder {
    let current = cart_id(&session);

    match cart::update_cart_line(repo.get_ref(), current.as_deref(), form).await {
        Ok(_) => {
            FlashMessage::success("Carrito actualizado.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::warning("Tu carrito está vacío.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(format!("Cantidad inválida: {message}")).send();
        }
        Err(err) => {
            log::error!("Failed to update cart: {err}");
            FlashMessage::error("No se pudo actualizar el carrito.").send();
        }
    }
    redirect("/cart")
}

#[post("/cart/remove")]
pub async fn remove_from_cart(
    repo: web::Data<ShopifyRepository>,
    session: Session,
    web::Form(form): web::Form<RemoveCartLineForm>,
) -> impl Responder {
    let current = cart_id(&session);

    match cart::remove_cart_line(repo.get_ref(), current.as_deref(), form).await {
        Ok(_) => {
            FlashMessage::success("Producto eliminado del carrito.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::warning("Tu carrito está vacío.").send();
        }
        Err(err) => {
            log::error!("Failed to remove from cart: {err}");
            FlashMessage::error("No se pudo eliminar el producto del carrito.").send();
        }
    }
    redirect("/cart")
}
