//! sea-orm entities for the point-of-sale database.

pub mod customers;
pub mod product_categories;
pub mod products;
pub mod quality_inspections;
pub mod repair_parts_usage;
pub mod repair_work_details;
pub mod repair_work_orders;
pub mod suppliers;
pub mod user_sessions;
pub mod users;
pub mod vehicle_brands;
pub mod vehicle_categories;
pub mod vehicle_damages;
pub mod vehicle_models;
pub mod vehicle_purchase_payments;
pub mod vehicle_purchase_transactions;
