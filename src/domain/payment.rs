//! Payment alternatives advertised on the product page.

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use reqwest::Url;
use serde::Serialize;

use crate::domain::product::Product;

/// Surcharge of financing with Addi.
pub const ADDI_RATE: f64 = 0.07;
/// Discount for direct bank transfers.
pub const DIRECT_DISCOUNT: f64 = 0.04;
/// Bank credit requests are attended from 8:00 to 20:00, Bogotá time.
pub const BANK_HOURS: (u32, u32) = (8, 20);

const BOGOTA_OFFSET_SECONDS: i32 = 5 * 3600;

/// Prices and links of every payment alternative for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentOptions {
    pub currency_code: String,
    pub base_amount: f64,
    pub addi_amount: f64,
    pub direct_amount: f64,
    pub bank_credit_open: bool,
    pub direct_whatsapp_url: String,
    pub addi_whatsapp_url: String,
}

impl PaymentOptions {
    /// Options for `product`, `None` when its price does not parse.
    pub fn for_product(
        product: &Product,
        whatsapp_number: &str,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let base_amount = product.max_price()?;
        let currency_code = product.price_range.max_variant_price.currency_code.clone();
        let addi_amount = round_cents(base_amount * (1.0 + ADDI_RATE));
        let direct_amount = round_cents(base_amount * (1.0 - DIRECT_DISCOUNT));

        let direct_text = format!(
            "Hola, estoy interesado en el producto \"{}\" y quiero pagarlo con pago directo. \
             Precio con descuento: {}.",
            product.title,
            format_price(direct_amount, &currency_code)
        );
        let addi_text = format!(
            "Hola, quiero financiar mi compra del producto \"{}\" con Addi. \
             El valor total del producto es de {}.",
            product.title,
            format_price(addi_amount, &currency_code)
        );

        Some(Self {
            direct_whatsapp_url: whatsapp_link(whatsapp_number, Some(&direct_text)),
            addi_whatsapp_url: whatsapp_link(whatsapp_number, Some(&addi_text)),
            currency_code,
            base_amount,
            addi_amount,
            direct_amount,
            bank_credit_open: bank_credit_open(now),
        })
    }
}

/// Whether bank credit requests are attended at `now`.
pub fn bank_credit_open(now: DateTime<Utc>) -> bool {
    let Some(offset) = FixedOffset::west_opt(BOGOTA_OFFSET_SECONDS) else {
        return false;
    };
    let hour = now.with_timezone(&offset).hour();
    hour >= BANK_HOURS.0 && hour < BANK_HOURS.1
}

/// `wa.me` link to `number`, optionally with a prefilled message.
pub fn whatsapp_link(number: &str, text: Option<&str>) -> String {
    let base = format!("https://wa.me/{}", number.trim_start_matches('+'));
    match text {
        Some(text) => Url::parse_with_params(&base, &[("text", text)])
            .map(String::from)
            .unwrap_or(base),
        None => base,
    }
}

/// Render an amount the way Colombian shoppers read it: `$ 1.234.567` for
/// pesos, two decimals with a code suffix for anything else.
pub fn format_price(amount: f64, currency_code: &str) -> String {
    if currency_code == "COP" {
        format!("$ {}", group_thousands(amount.round() as i64))
    } else {
        let whole = amount.trunc() as i64;
        let cents = ((amount - amount.trunc()).abs() * 100.0).round() as i64;
        format!("{},{cents:02} {currency_code}", group_thousands(whole))
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::product::fixtures::product;

    #[test]
    fn amounts_follow_the_surcharge_and_discount() {
        let item = product("P1", "JBL", "Parlante", &[], "100000");
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).single().expect("date");

        let options = PaymentOptions::for_product(&item, "573218520566", now).expect("options");

        assert_eq!(options.addi_amount, 107000.0);
        assert_eq!(options.direct_amount, 96000.0);
        assert!(options.direct_whatsapp_url.starts_with("https://wa.me/573218520566?text="));
    }

    #[test]
    fn unpriced_products_have_no_options() {
        let item = product("P1", "JBL", "Parlante", &[], "");
        assert!(PaymentOptions::for_product(&item, "1", Utc::now()).is_none());
    }

    #[test]
    fn bank_hours_use_bogota_time() {
        // 13:00 UTC is 08:00 in Bogotá.
        let opening = Utc.with_ymd_and_hms(2025, 3, 10, 13, 0, 0).single().expect("date");
        let closed = Utc.with_ymd_and_hms(2025, 3, 11, 1, 0, 0).single().expect("date");
        assert!(bank_credit_open(opening));
        assert!(!bank_credit_open(closed));
    }

    #[test]
    fn pesos_are_grouped_with_dots() {
        assert_eq!(format_price(1234567.4, "COP"), "$ 1.234.567");
        assert_eq!(format_price(950.0, "COP"), "$ 950");
        assert_eq!(format_price(1500.5, "USD"), "1.500,50 USD");
    }

    #[test]
    fn whatsapp_link_without_text_is_bare() {
        assert_eq!(whatsapp_link("+573018077982", None), "https://wa.me/573018077982");
    }
}
