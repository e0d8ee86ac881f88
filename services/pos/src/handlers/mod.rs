pub mod auth;
pub mod customer;
pub mod extract;
pub mod health;
pub mod product_catalog;
pub mod repair;
pub mod supplier;
pub mod user;
pub mod vehicle_catalog;
pub mod vehicle_purchase;
