use thiserror::Error;

/// Errors raised while talking to the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Network or TLS failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status without a GraphQL body.
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        body: String,
    },

    /// The response carried GraphQL errors; the first one is kept along
    /// with the variables the operation was sent with.
    #[error("{operation} failed ({status}, {cause}): {message}")]
    GraphQl {
        operation: String,
        variables: serde_json::Value,
        status: u16,
        message: String,
        cause: String,
    },

    #[error("{operation} was rate limited")]
    RateLimited {
        operation: String,
        retry_after: Option<u64>,
    },

    #[error("JSON deserialization error for {operation}: {source}")]
    Deserialize {
        operation: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} returned no data")]
    MissingData { operation: String },
}

pub type RepositoryResult<T> = Result<T, ShopifyError>;
