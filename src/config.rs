use std::env;

use thiserror::Error;

use crate::domain::brand::{StoreBrand, UnknownBrand};

pub const DEFAULT_API_VERSION: &str = "2024-07";
pub const DEFAULT_MAIN_MENU: &str = "main-menu";
pub const DEFAULT_FEED_CAPACITY: usize = 1024;
pub const DEFAULT_BANCO_BOGOTA_URL: &str = "https://slm.bancodebogota.com/lwjqqbfe";
pub const DEFAULT_ADDI_URL: &str = "https://co.addi.com/";

/// Errors raised while reading the storefront configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value `{value}` for {name}")]
    Invalid { name: &'static str, value: String },
    #[error(transparent)]
    Brand(#[from] UnknownBrand),
}

/// Settings shared by every request handler.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shopify store domain, with or without scheme.
    pub store_domain: String,
    pub access_token: String,
    pub api_version: String,
    pub brand: StoreBrand,
    pub whatsapp_number: String,
    pub banco_bogota_url: String,
    pub addi_url: String,
    /// Handle of the navigation menu.
    pub main_menu: String,
    /// Maximum number of visitor feeds kept in memory.
    pub feed_capacity: usize,
}

impl StorefrontConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let store_domain =
            get("SHOPIFY_STORE_DOMAIN").ok_or(ConfigError::Missing("SHOPIFY_STORE_DOMAIN"))?;
        let access_token = get("SHOPIFY_STOREFRONT_ACCESS_TOKEN")
            .ok_or(ConfigError::Missing("SHOPIFY_STOREFRONT_ACCESS_TOKEN"))?;

        let brand = match get("STORE_BRAND") {
            Some(value) => value.parse::<StoreBrand>()?,
            None => StoreBrand::Audio,
        };

        let feed_capacity = match get("FEED_CAPACITY") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FEED_CAPACITY",
                        value,
                    });
                }
            },
            None => DEFAULT_FEED_CAPACITY,
        };

        Ok(Self {
            store_domain,
            access_token,
            api_version: get("SHOPIFY_API_VERSION").unwrap_or(DEFAULT_API_VERSION.to_string()),
            whatsapp_number: get("WHATSAPP_NUMBER")
                .unwrap_or_else(|| default_whatsapp_number(brand).to_string()),
            banco_bogota_url: get("BANCO_BOGOTA_URL")
                .unwrap_or(DEFAULT_BANCO_BOGOTA_URL.to_string()),
            addi_url: get("ADDI_URL").unwrap_or(DEFAULT_ADDI_URL.to_string()),
            main_menu: get("MAIN_MENU").unwrap_or(DEFAULT_MAIN_MENU.to_string()),
            brand,
            feed_capacity,
        })
    }

    /// GraphQL endpoint of the Storefront API.
    pub fn graphql_endpoint(&self) -> String {
        let domain = self.store_domain.trim_end_matches('/');
        let base = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        };
        format!("{base}/api/{}/graphql.json", self.api_version)
    }
}

fn default_whatsapp_number(brand: StoreBrand) -> &'static str {
    match brand {
        StoreBrand::Audio => "573218520566",
        StoreBrand::Steel => "573018077982",
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_fill_optional_values() {
        let config = config(&[
            ("SHOPIFY_STORE_DOMAIN", "jake.myshopify.com"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", "token"),
        ])
        .expect("config");

        assert_eq!(config.brand, StoreBrand::Audio);
        assert_eq!(config.whatsapp_number, "573218520566");
        assert_eq!(config.feed_capacity, DEFAULT_FEED_CAPACITY);
        assert_eq!(
            config.graphql_endpoint(),
            "https://jake.myshopify.com/api/2024-07/graphql.json"
        );
    }

    #[test]
    fn steel_brand_has_its_own_whatsapp_number() {
        let config = config(&[
            ("SHOPIFY_STORE_DOMAIN", "https://equimas.myshopify.com/"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", "token"),
            ("STORE_BRAND", "steel"),
        ])
        .expect("config");

        assert_eq!(config.whatsapp_number, "573018077982");
        assert_eq!(
            config.graphql_endpoint(),
            "https://equimas.myshopify.com/api/2024-07/graphql.json"
        );
    }

    #[test]
    fn missing_token_is_reported() {
        let err = config(&[("SHOPIFY_STORE_DOMAIN", "x")]).expect_err("missing token");
        assert!(matches!(
            err,
            ConfigError::Missing("SHOPIFY_STOREFRONT_ACCESS_TOKEN")
        ));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = config(&[
            ("SHOPIFY_STORE_DOMAIN", "x"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", "t"),
            ("FEED_CAPACITY", "0"),
        ])
        .expect_err("invalid capacity");
        assert!(matches!(err, ConfigError::Invalid { name: "FEED_CAPACITY", .. }));
    }
}
