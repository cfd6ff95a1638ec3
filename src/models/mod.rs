//! Wire shapes of the Storefront API responses and their conversion into
//! domain types.

use serde::Deserialize;

use crate::domain::page_info::PageInfo;

pub mod cart;
pub mod collection;
pub mod content;
pub mod filters;
pub mod menu;
pub mod product;

/// Relay-style connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    /// Nodes of the connection with the edges stripped.
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}
