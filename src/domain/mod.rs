pub mod brand;
pub mod cart;
pub mod collection;
pub mod content;
pub mod facets;
pub mod feed;
pub mod filter;
pub mod menu;
pub mod page_info;
pub mod payment;
pub mod product;
pub mod search;
pub mod sort;
