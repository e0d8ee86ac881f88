mod helpers;

mod auth_test;
mod master_data_test;
mod repair_test;
mod router_test;
mod vehicle_purchase_test;
