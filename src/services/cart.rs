use crate::domain::cart::Cart;
use crate::forms::cart::{AddToCartForm, RemoveCartLineForm, UpdateCartLineForm};
use crate::repository::{CartReader, CartWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the visitor's cart. A stale id yields `None` so the caller can
/// drop it from the session.
pub async fn load_cart<R>(repo: &R, cart_id: Option<&str>) -> ServiceResult<Option<Cart>>
where
    R: CartReader + ?Sized,
{
    match cart_id {
        Some(cart_id) => Ok(repo.get_cart(cart_id).await?),
        None => Ok(None),
    }
}

/// Adds a variant to the visitor's cart, creating the cart when the visitor
/// has none or the stored one no longer exists.
pub async fn add_to_cart<R>(
    repo: &R,
    cart_id: Option<&str>,
    form: AddToCartForm,
) -> ServiceResult<Cart>
where
    R: CartReader + CartWriter + ?Sized,
{
    let line = form
        .into_line()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let cart = match load_cart(repo, cart_id).await? {
        Some(cart) => cart,
        None => {
            let cart = repo.create_cart().await?;
            log::info!("Created cart {}", cart.id);
            cart
        }
    };

    Ok(repo.add_to_cart(&cart.id, &[line]).await?)
}

/// Changes the quantity of a line; zero removes it.
pub async fn update_cart_line<R>(
    repo: &R,
    cart_id: Option<&str>,
    form: UpdateCartLineForm,
) -> ServiceResult<Cart>
where
    R: CartWriter + ?Sized,
{
    let cart_id = cart_id.ok_or(ServiceError::NotFound)?;
    let update = form
        .into_update()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if update.quantity == 0 {
        return Ok(repo.remove_from_cart(cart_id, &[update.id]).await?);
    }
    Ok(repo.update_cart(cart_id, &[update]).await?)
}

pub async fn remove_cart_line<R>(
    repo: &R,
    cart_id: Option<&str>,
    form: RemoveCartLineForm,
) -> ServiceResult<Cart>
where
    R: CartWriter + ?Sized,
{
    let cart_id = cart_id.ok_or(ServiceError::NotFound)?;
    let line_id = form
        .into_line_id()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(repo.remove_from_cart(cart_id, &[line_id]).await?)
}
