//! Thin GraphQL client for the Storefront API.
//!
//! Every operation is a POST of `{query, variables}` to one endpoint with the
//! storefront access token header. GraphQL errors are surfaced as
//! [`ShopifyError::GraphQl`] labelled with the operation name.

use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::StorefrontConfig;
use crate::repository::errors::{RepositoryResult, ShopifyError};
use crate::repository::queries::operation_name;

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<Value>,
}

impl GraphQlError {
    fn cause(&self) -> String {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub struct ShopifyClient {
    http: Client,
    endpoint: String,
    access_token: String,
}

impl ShopifyClient {
    /// Client for the store named in `config`.
    pub fn new(config: &StorefrontConfig) -> RepositoryResult<Self> {
        Self::with_endpoint(&config.graphql_endpoint(), &config.access_token)
    }

    /// Client posting to an explicit endpoint, used against mock servers.
    pub fn with_endpoint(endpoint: &str, access_token: &str) -> RepositoryResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("pushkind-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            access_token: access_token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run `document` with `variables` and decode its `data` as `T`.
    pub async fn execute<T>(&self, document: &str, variables: Value) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
    {
        let operation = operation_name(document).to_string();
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": document, "variables": &variables }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok());
            return Err(ShopifyError::RateLimited {
                operation,
                retry_after,
            });
        }

        let body = response.bytes().await?;
        let parsed: GraphQlResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ShopifyError::Status {
                    operation,
                    status: status.as_u16(),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }
            Err(source) => return Err(ShopifyError::Deserialize { operation, source }),
        };

        if let Some(error) = parsed.errors.first() {
            log::warn!(
                "{operation} returned {} GraphQL error(s) for variables {variables}",
                parsed.errors.len()
            );
            return Err(ShopifyError::GraphQl {
                variables,
                cause: error.cause(),
                message: error.message.clone(),
                status: if status.is_success() {
                    500
                } else {
                    status.as_u16()
                },
                operation,
            });
        }

        if !status.is_success() {
            return Err(ShopifyError::Status {
                operation,
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        match parsed.data.filter(|data| !data.is_null()) {
            Some(data) => serde_json::from_value(data)
                .map_err(|source| ShopifyError::Deserialize { operation, source }),
            None => Err(ShopifyError::MissingData { operation }),
        }
    }
}
