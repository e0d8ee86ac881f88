use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use showroom_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth, customer, health::health, product_catalog as products, repair, supplier, user,
    vehicle_catalog as vehicles, vehicle_purchase as purchases,
};
use crate::state::AppState;

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(propagate_request_id_layer()),
        )
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", post(auth::change_password))
        .route("/auth/sessions", get(auth::sessions))
        .route("/auth/revoke-all", post(auth::revoke_all))
        // Users
        .route("/users", post(user::create_user).get(user::list_users))
        .route("/users/{id}", get(user::get_user).put(user::update_user))
        .route("/users/{id}/deactivate", post(user::deactivate_user))
        .route("/users/{id}/activate", post(user::activate_user))
        // Customers and suppliers
        .route(
            "/customers",
            post(customer::create_customer).get(customer::list_customers),
        )
        .route(
            "/customers/{id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
        .route(
            "/suppliers",
            post(supplier::create_supplier).get(supplier::list_suppliers),
        )
        .route(
            "/suppliers/{id}",
            get(supplier::get_supplier)
                .put(supplier::update_supplier)
                .delete(supplier::delete_supplier),
        )
        // Vehicle catalog
        .route(
            "/vehicle-brands",
            post(vehicles::create_brand).get(vehicles::list_brands),
        )
        .route(
            "/vehicle-brands/{id}",
            get(vehicles::get_brand)
                .put(vehicles::update_brand)
                .delete(vehicles::delete_brand),
        )
        .route(
            "/vehicle-categories",
            post(vehicles::create_category).get(vehicles::list_categories),
        )
        .route(
            "/vehicle-categories/{id}",
            get(vehicles::get_category)
                .put(vehicles::update_category)
                .delete(vehicles::delete_category),
        )
        .route(
            "/vehicle-models",
            post(vehicles::create_model).get(vehicles::list_models),
        )
        .route(
            "/vehicle-models/{id}",
            get(vehicles::get_model)
                .put(vehicles::update_model)
                .delete(vehicles::delete_model),
        )
        // Product catalog
        .route(
            "/product-categories",
            post(products::create_category).get(products::list_categories),
        )
        .route(
            "/product-categories/{id}",
            get(products::get_category)
                .put(products::update_category)
                .delete(products::deactivate_category),
        )
        .route("/product-categories/{id}/move", post(products::move_category))
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/{id}/stock", post(products::adjust_stock))
        // Vehicle purchase
        .route(
            "/vehicle-purchases",
            post(purchases::create_transaction).get(purchases::list_transactions),
        )
        .route(
            "/vehicle-purchases/pending-approval",
            get(purchases::pending_approval),
        )
        .route("/vehicle-purchases/dashboard", get(purchases::dashboard))
        .route("/vehicle-purchases/statistics", get(purchases::statistics))
        .route(
            "/vehicle-purchases/number/{number}",
            get(purchases::get_transaction_by_number),
        )
        .route(
            "/vehicle-purchases/vin/{vin}",
            get(purchases::get_transaction_by_vin),
        )
        .route(
            "/vehicle-purchases/{id}",
            get(purchases::get_transaction)
                .put(purchases::update_transaction)
                .delete(purchases::delete_transaction),
        )
        .route("/vehicle-purchases/{id}/status", put(purchases::update_status))
        .route(
            "/vehicle-purchases/{id}/inspection",
            post(purchases::complete_inspection),
        )
        .route(
            "/vehicle-purchases/{id}/approve",
            post(purchases::approve_transaction),
        )
        .route("/vehicle-purchases/{id}/payments", get(purchases::list_payments))
        .route("/vehicle-purchases/{id}/damages", get(repair::list_damages))
        .route("/payments", post(purchases::create_payment))
        .route("/payments/{id}", get(purchases::get_payment))
        .route("/payments/{id}/process", post(purchases::process_payment))
        .route("/payments/{id}/approve", post(purchases::approve_payment))
        // Damages
        .route("/damages", post(repair::create_damage))
        .route(
            "/damages/{id}",
            get(repair::get_damage)
                .put(repair::update_damage)
                .delete(repair::delete_damage),
        )
        .route("/damages/{id}/status", put(repair::update_damage_status))
        // Work orders
        .route(
            "/work-orders",
            post(repair::create_work_order).get(repair::list_work_orders),
        )
        .route("/work-orders/dashboard", get(repair::repair_dashboard))
        .route(
            "/work-orders/mechanic/{mechanic_id}",
            get(repair::work_orders_by_mechanic),
        )
        .route(
            "/work-orders/{id}",
            get(repair::get_work_order)
                .put(repair::update_work_order)
                .delete(repair::delete_work_order),
        )
        .route("/work-orders/{id}/status", put(repair::update_work_order_status))
        .route("/work-orders/{id}/assign", post(repair::assign_work_order))
        .route("/work-orders/{id}/approve", post(repair::approve_work_order))
        .route("/work-orders/{id}/summary", get(repair::work_order_summary))
        .route("/work-orders/{id}/details", get(repair::list_work_details))
        .route("/work-orders/{id}/inspections", get(repair::list_inspections))
        .route("/mechanics/{id}/metrics", get(repair::mechanic_metrics))
        // Work details
        .route("/work-details", post(repair::create_work_detail))
        .route(
            "/work-details/{id}",
            get(repair::get_work_detail)
                .put(repair::update_work_detail)
                .delete(repair::delete_work_detail),
        )
        .route(
            "/work-details/{id}/status",
            put(repair::update_work_detail_status),
        )
        .route("/work-details/{id}/progress", post(repair::update_progress))
        .route("/work-details/{id}/quality-check", post(repair::quality_check))
        .route("/work-details/{id}/parts", get(repair::list_parts_usage))
        // Parts usage
        .route("/parts-usage", post(repair::create_parts_usage))
        .route("/parts-usage/pending", get(repair::pending_parts_usage))
        .route("/parts-usage/{id}", get(repair::get_parts_usage))
        .route("/parts-usage/{id}/approve", post(repair::approve_parts_usage))
        // Quality inspections
        .route("/inspections", post(repair::create_inspection))
        .route("/inspections/metrics", get(repair::quality_metrics))
        .route(
            "/inspections/{id}",
            get(repair::get_inspection).put(repair::update_inspection),
        )
        .route(
            "/inspections/{id}/status",
            put(repair::update_inspection_status),
        )
        .route("/inspections/{id}/sign-off", post(repair::sign_off_inspection))
        .route("/inspections/{id}/rework", post(repair::schedule_rework))
}
