use serde::Deserialize;
use serde_json::json;

use crate::domain::cart::{Cart as DomainCart, CartLineInput, CartLineUpdate};
use crate::models::cart::Cart;
use crate::repository::queries::{
    ADD_TO_CART_MUTATION, CART_QUERY, CREATE_CART_MUTATION, REMOVE_FROM_CART_MUTATION,
    UPDATE_CART_MUTATION,
};
use crate::repository::{CartReader, CartWriter, RepositoryResult, ShopifyError, ShopifyRepository};

#[derive(Deserialize)]
struct CartPayload {
    cart: Option<Cart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCartData {
    cart_create: CartPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartData {
    cart_lines_add: CartPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCartData {
    cart_lines_update: CartPayload,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveFromCartData {
    cart_lines_remove: CartPayload,
}

fn mutated_cart(payload: CartPayload, operation: &str) -> RepositoryResult<DomainCart> {
    payload
        .cart
        .map(DomainCart::from)
        .ok_or_else(|| ShopifyError::MissingData {
            operation: operation.to_string(),
        })
}

impl CartReader for ShopifyRepository {
    async fn get_cart(&self, cart_id: &str) -> RepositoryResult<Option<DomainCart>> {
        let data: CartPayload = self
            .client()
            .execute(CART_QUERY, json!({ "cartId": cart_id }))
            .await?;
        Ok(data.cart.map(DomainCart::from))
    }
}

impl CartWriter for ShopifyRepository {
    async fn create_cart(&self) -> RepositoryResult<DomainCart> {
        let data: CreateCartData = self
            .client()
            .execute(CREATE_CART_MUTATION, json!({}))
            .await?;
        mutated_cart(data.cart_create, "createCart")
    }

    async fn add_to_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> RepositoryResult<DomainCart> {
        let data: AddToCartData = self
            .client()
            .execute(ADD_TO_CART_MUTATION, json!({ "cartId": cart_id, "lines": lines }))
            .await?;
        mutated_cart(data.cart_lines_add, "addToCart")
    }

    async fn update_cart(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdate],
    ) -> RepositoryResult<DomainCart> {
        let data: UpdateCartData = self
            .client()
            .execute(UPDATE_CART_MUTATION, json!({ "cartId": cart_id, "lines": lines }))
            .await?;
        mutated_cart(data.cart_lines_update, "editCartItems")
    }

    async fn remove_from_cart(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> RepositoryResult<DomainCart> {
        let data: RemoveFromCartData = self
            .client()
            .execute(
                REMOVE_FROM_CART_MUTATION,
                json!({ "cartId": cart_id, "lineIds": line_ids }),
            )
            .await?;
        mutated_cart(data.cart_lines_remove, "removeFromCart")
    }
}
