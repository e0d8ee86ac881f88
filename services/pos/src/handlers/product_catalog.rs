use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::{ProductCategoryPatch, ProductPatch};
use crate::domain::types::{Product, ProductCategory, ProductFilter};
use crate::error::PosError;
use crate::handlers::extract::{AppJson, AppPath, AppQuery, ListQuery};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::product_catalog::{CreateProductCategoryInput, CreateProductInput};

// ── Category tree ────────────────────────────────────────────────────────────

pub async fn create_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateProductCategoryInput>,
) -> Result<ApiResponse<ProductCategory>, PosError> {
    let category = state.product_catalog_service().create_category(body).await?;
    Ok(ApiResponse::created("product category created", category))
}

pub async fn list_categories(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<ProductCategory>, PosError> {
    let page = query.page_request();
    let categories = state
        .product_catalog_service()
        .list_categories(&query.master_filter(), page)
        .await?;
    Ok(PaginatedResponse::new("product categories", categories, page))
}

pub async fn get_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<ProductCategory>, PosError> {
    let category = state.product_catalog_service().get_category(id).await?;
    Ok(ApiResponse::ok("product category", category))
}

pub async fn update_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<ProductCategoryPatch>,
) -> Result<ApiResponse<ProductCategory>, PosError> {
    let category = state
        .product_catalog_service()
        .update_category(id, patch)
        .await?;
    Ok(ApiResponse::ok("product category updated", category))
}

// ── POST /product-categories/{id}/move ───────────────────────────────────────

#[derive(Deserialize)]
pub struct MoveCategoryRequest {
    pub parent_id: Option<i64>,
}

pub async fn move_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<MoveCategoryRequest>,
) -> Result<ApiResponse<ProductCategory>, PosError> {
    let category = state
        .product_catalog_service()
        .move_category(id, body.parent_id)
        .await?;
    Ok(ApiResponse::ok("product category moved", category))
}

// ── DELETE /product-categories/{id} ──────────────────────────────────────────

pub async fn deactivate_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<ProductCategory>, PosError> {
    let category = state
        .product_catalog_service()
        .deactivate_category(id)
        .await?;
    Ok(ApiResponse::ok("product category deactivated", category))
}

// ── Products ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ProductQuery {
    pub category_id: Option<i64>,
    #[serde(default)]
    pub low_stock: bool,
}

pub async fn create_product(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateProductInput>,
) -> Result<ApiResponse<Product>, PosError> {
    let product = state.product_catalog_service().create_product(body).await?;
    Ok(ApiResponse::created("product created", product))
}

pub async fn list_products(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
    WithRejection(Query(refs), _): AppQuery<ProductQuery>,
) -> Result<PaginatedResponse<Product>, PosError> {
    let filter = ProductFilter {
        base: query.master_filter(),
        category_id: refs.category_id,
        low_stock: refs.low_stock,
    };
    let page = query.page_request();
    let products = state
        .product_catalog_service()
        .list_products(&filter, page)
        .await?;
    Ok(PaginatedResponse::new("products", products, page))
}

pub async fn get_product(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<Product>, PosError> {
    let product = state.product_catalog_service().get_product(id).await?;
    Ok(ApiResponse::ok("product", product))
}

pub async fn update_product(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<ProductPatch>,
) -> Result<ApiResponse<Product>, PosError> {
    let product = state
        .product_catalog_service()
        .update_product(id, patch)
        .await?;
    Ok(ApiResponse::ok("product updated", product))
}

pub async fn delete_product(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.product_catalog_service().delete_product(id).await?;
    Ok(ApiResponse::ok("product deleted", ()))
}

// ── POST /products/{id}/stock ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i32,
}

/// Manual stock correction. Workshop consumption goes through parts usage
/// approval instead.
pub async fn adjust_stock(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<AdjustStockRequest>,
) -> Result<ApiResponse<Product>, PosError> {
    current.require_approver()?;
    let product = state
        .product_catalog_service()
        .adjust_stock(id, body.delta)
        .await?;
    Ok(ApiResponse::ok("stock adjusted", product))
}
