use pushkind_common::routes::empty_string_as_none;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::cart::{CartLineInput, CartLineUpdate};

/// Largest quantity accepted for a single line.
const MAX_QUANTITY: u32 = 99;
/// Global ids of variants and lines are short; anything longer is bogus.
const ID_MAX_LEN: u64 = 256;

/// Result type returned by the cart form helpers.
pub type CartFormResult<T> = Result<T, CartFormError>;

/// Errors that can occur while processing cart forms.
#[derive(Debug, Error)]
pub enum CartFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("no se seleccionó ningún producto")]
    MissingMerchandise,
}

/// Payload of the add-to-cart form on product pages.
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartForm {
    /// Variant id selected by the visitor.
    #[validate(length(min = 1, max = ID_MAX_LEN))]
    pub merchandise_id: String,
    #[validate(range(min = 1, max = MAX_QUANTITY))]
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Storefront path to return to after submitting.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub return_to: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

/// Whether `path` stays on this site once a browser resolves it.
///
/// Browsers read `\` as `/` and drop tabs and newlines, so `/\host` and
/// `/\t/host` both reach another origin.
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/')
        && chars.next() != Some('/')
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}

impl AddToCartForm {
    /// Where to send the visitor after submitting; the cart unless
    /// `return_to` is a path on this site.
    pub fn return_path(&self) -> String {
        self.return_to
            .as_deref()
            .filter(|path| is_local_path(path))
            .unwrap_or("/cart")
            .to_string()
    }

    pub fn into_line(self) -> CartFormResult<CartLineInput> {
        self.validate()?;

        let merchandise_id = self.merchandise_id.trim().to_string();
        if merchandise_id.is_empty() {
            return Err(CartFormError::MissingMerchandise);
        }

        Ok(CartLineInput {
            merchandise_id,
            quantity: self.quantity,
        })
    }
}

/// Quantity change of one cart line. Zero removes the line.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartLineForm {
    #[validate(length(min = 1, max = ID_MAX_LEN))]
    pub line_id: String,
    #[validate(length(min = 1, max = ID_MAX_LEN))]
    pub merchandise_id: String,
    #[validate(range(max = MAX_QUANTITY))]
    pub quantity: u32,
}

impl UpdateCartLineForm {
    pub fn into_update(self) -> CartFormResult<CartLineUpdate> {
        self.validate()?;
        Ok(CartLineUpdate {
            id: self.line_id,
            merchandise_id: self.merchandise_id,
            quantity: self.quantity,
        })
    }
}

/// Removal of one cart line.
#[derive(Debug, Deserialize, Validate)]
pub struct RemoveCartLineForm {
    #[validate(length(min = 1, max = ID_MAX_LEN))]
    pub line_id: String,
}

impl RemoveCartLineForm {
    pub fn into_line_id(self) -> CartFormResult<String> {
        self.validate()?;
        Ok(self.line_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_defaults_to_one_unit() {
        let form: AddToCartForm =
            serde_html_form::from_str("merchandise_id=gid%3A%2F%2Fshopify%2FProductVariant%2F1")
                .expect("form");

        let line = form.into_line().expect("line");

        assert_eq!(line.merchandise_id, "gid://shopify/ProductVariant/1");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn add_form_rejects_zero_quantity() {
        let form = AddToCartForm {
            merchandise_id: "gid://shopify/ProductVariant/1".into(),
            quantity: 0,
            return_to: None,
        };

        assert!(matches!(form.into_line(), Err(CartFormError::Validation(_))));
    }

    #[test]
    fn add_form_rejects_blank_merchandise() {
        let form = AddToCartForm {
            merchandise_id: "   ".into(),
            quantity: 1,
            return_to: None,
        };

        assert!(matches!(form.into_line(), Err(CartFormError::MissingMerchandise)));
    }

    #[test]
    fn return_path_stays_on_site() {
        let form = |return_to: &str| AddToCartForm {
            merchandise_id: "gid://shopify/ProductVariant/1".into(),
            quantity: 1,
            return_to: Some(return_to.into()),
        };

        assert_eq!(form("/product/bafle?variant=2").return_path(), "/product/bafle?variant=2");
        assert_eq!(form("/").return_path(), "/");
        for foreign in [
            "//evil.example",
            "/\\evil.example",
            "/\t/evil.example",
            "/product\\..\\evil",
            "https://evil.example",
            "evil.example",
        ] {
            assert_eq!(form(foreign).return_path(), "/cart", "{foreign:?}");
        }

        let none = AddToCartForm {
            return_to: None,
            ..form("/")
        };
        assert_eq!(none.return_path(), "/cart");
    }

    #[test]
    fn update_form_accepts_zero() {
        let form = UpdateCartLineForm {
            line_id: "line-1".into(),
            merchandise_id: "variant-1".into(),
            quantity: 0,
        };

        assert_eq!(form.into_update().expect("update").quantity, 0);
    }

    #[test]
    fn update_form_caps_quantity() {
        let form = UpdateCartLineForm {
            line_id: "line-1".into(),
            merchandise_id: "variant-1".into(),
            quantity: 500,
        };

        assert!(form.into_update().is_err());
    }
}
