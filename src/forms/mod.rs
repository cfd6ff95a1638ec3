pub mod browse;
pub mod cart;
