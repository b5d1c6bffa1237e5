pub mod cart;
pub mod client;
pub mod money;
pub mod pricing;
pub mod product;
pub mod sale;
