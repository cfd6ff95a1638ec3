//! Helpers for integration tests: a mock Storefront API and matching fixtures.
#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockBuilder, MockServer, Request, ResponseTemplate};

use pushkind_storefront::config::StorefrontConfig;
use pushkind_storefront::repository::queries::operation_name;
use pushkind_storefront::repository::{ShopifyClient, ShopifyRepository};

pub const STORE_DOMAIN: &str = "jake-tienda.myshopify.com";
pub const GRAPHQL_PATH: &str = "/api/2024-07/graphql.json";
pub const ACCESS_TOKEN: &str = "test-token";

/// Matches requests whose GraphQL document declares `operation`.
pub struct Operation(pub &'static str);

impl Match for Operation {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        body.get("query")
            .and_then(Value::as_str)
            .is_some_and(|document| operation_name(document) == self.0)
    }
}

/// Mock of a POST carrying the named GraphQL operation.
pub fn graphql(operation: &'static str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(Operation(operation))
}

/// Successful GraphQL response wrapping `data`.
pub fn data(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

pub fn config() -> StorefrontConfig {
    StorefrontConfig::from_lookup(|name| match name {
        "SHOPIFY_STORE_DOMAIN" => Some(STORE_DOMAIN.to_string()),
        "SHOPIFY_STOREFRONT_ACCESS_TOKEN" => Some(ACCESS_TOKEN.to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn repository(server: &MockServer) -> ShopifyRepository {
    let client =
        ShopifyClient::with_endpoint(&format!("{}{GRAPHQL_PATH}", server.uri()), ACCESS_TOKEN)
            .expect("client");
    ShopifyRepository::new(client, STORE_DOMAIN)
}

/// Variables sent with the `index`-th request received by `server`.
pub async fn sent_variables(server: &MockServer, index: usize) -> Value {
    let requests = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&requests[index].body).expect("json body");
    body["variables"].clone()
}

/// Storefront API product node.
pub fn product(handle: &str, vendor: &str, tags: &[&str], price: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "availableForSale": true,
        "title": format!("Producto {handle}"),
        "description": "",
        "descriptionHtml": "",
        "vendor": vendor,
        "productType": "Parlante",
        "options": [{"id": "opt", "name": "Title", "values": ["Default Title"]}],
        "priceRange": {
            "minVariantPrice": {"amount": price, "currencyCode": "COP"},
            "maxVariantPrice": {"amount": price, "currencyCode": "COP"}
        },
        "variants": {"edges": [{"node": {
            "id": format!("gid://shopify/ProductVariant/{handle}"),
            "title": "Default Title",
            "availableForSale": true,
            "quantityAvailable": 3,
            "selectedOptions": [{"name": "Title", "value": "Default Title"}],
            "price": {"amount": price, "currencyCode": "COP"}
        }}]},
        "featuredImage": {
            "url": format!("https://cdn.shopify.com/files/{handle}.jpg"),
            "altText": null,
            "width": 800,
            "height": 800
        },
        "images": {"edges": []},
        "collections": {"edges": []},
        "seo": {"title": null, "description": null},
        "tags": tags,
        "updatedAt": "2025-01-15T10:00:00Z"
    })
}

/// Product connection with the given nodes and next-page cursor.
pub fn products(nodes: Vec<Value>, next_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = nodes.into_iter().map(|node| json!({ "node": node })).collect();
    json!({
        "edges": edges,
        "pageInfo": {
            "hasNextPage": next_cursor.is_some(),
            "hasPreviousPage": false,
            "startCursor": null,
            "endCursor": next_cursor
        }
    })
}

/// Cart payload with one line per `(merchandise, quantity)` pair.
pub fn cart(id: &str, lines: &[(&str, u32)], with_tax: bool) -> Value {
    let edges: Vec<Value> = lines
        .iter()
        .map(|(merchandise, quantity)| {
            json!({"node": {
                "id": format!("gid://shopify/CartLine/{merchandise}"),
                "quantity": quantity,
                "cost": {"totalAmount": {"amount": "100.0", "currencyCode": "COP"}},
                "merchandise": {
                    "id": format!("gid://shopify/ProductVariant/{merchandise}"),
                    "title": "Default Title",
                    "selectedOptions": [],
                    "product": {
                        "id": format!("gid://shopify/Product/{merchandise}"),
                        "handle": merchandise,
                        "title": format!("Producto {merchandise}"),
                        "featuredImage": null
                    }
                }
            }})
        })
        .collect();
    let total: u32 = lines.iter().map(|(_, quantity)| quantity).sum();
    let tax = if with_tax {
        json!({"amount": "19.0", "currencyCode": "COP"})
    } else {
        Value::Null
    };
    json!({
        "id": id,
        "checkoutUrl": format!("https://{STORE_DOMAIN}/checkouts/1"),
        "cost": {
            "subtotalAmount": {"amount": "100.0", "currencyCode": "COP"},
            "totalAmount": {"amount": "100.0", "currencyCode": "COP"},
            "totalTaxAmount": tax
        },
        "lines": {"edges": edges},
        "totalQuantity": total
    })
}

/// Navigation menu with a category heading and a brands heading.
pub fn menu() -> Value {
    json!({"menu": {"items": [
        {"id": "1", "title": "Inicio", "url": format!("https://{STORE_DOMAIN}/"), "items": []},
        {"id": "2", "title": "Catálogo", "url": format!("https://{STORE_DOMAIN}/collections"),
         "items": []},
        {"id": "3", "title": "Nosotros", "url": format!("https://{STORE_DOMAIN}/pages/about-us"),
         "items": []},
        {"id": "4", "title": "Marcas", "url": format!("https://{STORE_DOMAIN}/collections/marcas"),
         "items": [
            {"id": "41", "title": "JBL", "url": format!("https://{STORE_DOMAIN}/collections/jbl"),
             "resource": {"handle": "jbl", "image": null}, "items": []}
         ]}
    ]}})
}
