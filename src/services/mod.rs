use thiserror::Error;

use crate::repository::ShopifyError;

pub mod cart;
pub mod catalog;
pub mod content;
pub mod feeds;
pub mod layout;
pub mod product;
pub mod search;

/// Errors surfaced by the service layer to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("upstream error: {0}")]
    Upstream(#[from] ShopifyError),
    #[error("not found")]
    NotFound,
    /// Submitted form data was rejected; the message is shown to the visitor.
    #[error("{0}")]
    Form(String),
    /// The visitor's feed no longer matches the page that requested more products.
    #[error("feed expired")]
    FeedExpired,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
