use serde::Deserialize;

use crate::domain::cart::{
    Cart as DomainCart, CartCost as DomainCartCost, CartLine as DomainCartLine, CartMerchandise,
    CartProduct,
};
use crate::domain::product::{Money, SelectedOption};
use crate::models::Connection;
use crate::models::product::Image;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    #[serde(default)]
    pub total_tax_amount: Option<Money>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub featured_image: Option<Image>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
    pub product: Product,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineCost {
    #[serde(rename = "totalAmount")]
    pub total_amount: Money,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub quantity: u32,
    pub cost: LineCost,
    pub merchandise: Merchandise,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub checkout_url: String,
    pub cost: CartCost,
    #[serde(default)]
    pub lines: Connection<CartLine>,
    #[serde(default)]
    pub total_quantity: u32,
}

impl From<Cart> for DomainCart {
    fn from(value: Cart) -> Self {
        Self {
            id: value.id,
            checkout_url: value.checkout_url,
            cost: DomainCartCost {
                subtotal_amount: value.cost.subtotal_amount,
                total_amount: value.cost.total_amount,
                total_tax_amount: value.cost.total_tax_amount.unwrap_or_else(Money::zero_usd),
            },
            lines: value
                .lines
                .into_nodes()
                .into_iter()
                .map(DomainCartLine::from)
                .collect(),
            total_quantity: value.total_quantity,
        }
    }
}

impl From<CartLine> for DomainCartLine {
    fn from(value: CartLine) -> Self {
        let product = value.merchandise.product;
        Self {
            id: value.id,
            quantity: value.quantity,
            total_amount: value.cost.total_amount,
            merchandise: CartMerchandise {
                id: value.merchandise.id,
                title: value.merchandise.title,
                selected_options: value.merchandise.selected_options,
                product: CartProduct {
                    featured_image: product
                        .featured_image
                        .map(|image| image.into_domain(&product.title)),
                    id: product.id,
                    handle: product.handle,
                    title: product.title,
                },
            },
        }
    }
}
