use serde::{Deserialize, Serialize};

use crate::domain::product::{Image, Money, SelectedOption};

/// Cost breakdown of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCost {
    /// Sum of line totals before taxes.
    pub subtotal_amount: Money,
    /// Amount to pay.
    pub total_amount: Money,
    /// Tax amount, zero in USD when the backend omits it.
    pub total_tax_amount: Money,
}

/// Product data attached to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub featured_image: Option<Image>,
}

/// Variant referenced by a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMerchandise {
    /// Variant identifier.
    pub id: String,
    pub title: String,
    pub selected_options: Vec<SelectedOption>,
    pub product: CartProduct,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Line identifier used by update and remove mutations.
    pub id: String,
    pub quantity: u32,
    /// Total cost of the line.
    pub total_amount: Money,
    pub merchandise: CartMerchandise,
}

/// Shopping cart owned by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart identifier kept in the visitor's session.
    pub id: String,
    /// Hosted checkout page.
    pub checkout_url: String,
    pub cost: CartCost,
    pub lines: Vec<CartLine>,
    /// Number of units across all lines.
    pub total_quantity: u32,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line holding `merchandise_id`, if present.
    pub fn line_for(&self, merchandise_id: &str) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.merchandise.id == merchandise_id)
    }
}

/// New line to add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    pub merchandise_id: String,
    pub quantity: u32,
}

/// Quantity change of an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdate {
    pub id: String,
    pub merchandise_id: String,
    pub quantity: u32,
}
