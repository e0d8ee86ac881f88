use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::{VehicleBrandPatch, VehicleCategoryPatch, VehicleModelPatch};
use crate::domain::types::{VehicleBrand, VehicleCategory, VehicleModel, VehicleModelFilter};
use crate::error::PosError;
use crate::handlers::extract::{AppJson, AppPath, AppQuery, ListQuery};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::vehicle_catalog::{
    CreateVehicleBrandInput, CreateVehicleCategoryInput, CreateVehicleModelInput,
};

// ── Brands ───────────────────────────────────────────────────────────────────

pub async fn create_brand(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateVehicleBrandInput>,
) -> Result<ApiResponse<VehicleBrand>, PosError> {
    let brand = state.vehicle_catalog_service().create_brand(body).await?;
    Ok(ApiResponse::created("vehicle brand created", brand))
}

pub async fn list_brands(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<VehicleBrand>, PosError> {
    let page = query.page_request();
    let brands = state
        .vehicle_catalog_service()
        .list_brands(&query.master_filter(), page)
        .await?;
    Ok(PaginatedResponse::new("vehicle brands", brands, page))
}

pub async fn get_brand(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<VehicleBrand>, PosError> {
    let brand = state.vehicle_catalog_service().get_brand(id).await?;
    Ok(ApiResponse::ok("vehicle brand", brand))
}

pub async fn update_brand(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<VehicleBrandPatch>,
) -> Result<ApiResponse<VehicleBrand>, PosError> {
    let brand = state.vehicle_catalog_service().update_brand(id, patch).await?;
    Ok(ApiResponse::ok("vehicle brand updated", brand))
}

pub async fn delete_brand(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.vehicle_catalog_service().delete_brand(id).await?;
    Ok(ApiResponse::ok("vehicle brand deleted", ()))
}

// ── Categories ───────────────────────────────────────────────────────────────

pub async fn create_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateVehicleCategoryInput>,
) -> Result<ApiResponse<VehicleCategory>, PosError> {
    let category = state.vehicle_catalog_service().create_category(body).await?;
    Ok(ApiResponse::created("vehicle category created", category))
}

pub async fn list_categories(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<VehicleCategory>, PosError> {
    let page = query.page_request();
    let categories = state
        .vehicle_catalog_service()
        .list_categories(&query.master_filter(), page)
        .await?;
    Ok(PaginatedResponse::new("vehicle categories", categories, page))
}

pub async fn get_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<VehicleCategory>, PosError> {
    let category = state.vehicle_catalog_service().get_category(id).await?;
    Ok(ApiResponse::ok("vehicle category", category))
}

pub async fn update_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<VehicleCategoryPatch>,
) -> Result<ApiResponse<VehicleCategory>, PosError> {
    let category = state
        .vehicle_catalog_service()
        .update_category(id, patch)
        .await?;
    Ok(ApiResponse::ok("vehicle category updated", category))
}

pub async fn delete_category(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.vehicle_catalog_service().delete_category(id).await?;
    Ok(ApiResponse::ok("vehicle category deleted", ()))
}

// ── Models ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ModelQuery {
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
}

pub async fn create_model(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateVehicleModelInput>,
) -> Result<ApiResponse<VehicleModel>, PosError> {
    let model = state.vehicle_catalog_service().create_model(body).await?;
    Ok(ApiResponse::created("vehicle model created", model))
}

pub async fn list_models(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
    WithRejection(Query(refs), _): AppQuery<ModelQuery>,
) -> Result<PaginatedResponse<VehicleModel>, PosError> {
    let filter = VehicleModelFilter {
        base: query.master_filter(),
        brand_id: refs.brand_id,
        category_id: refs.category_id,
    };
    let page = query.page_request();
    let models = state
        .vehicle_catalog_service()
        .list_models(&filter, page)
        .await?;
    Ok(PaginatedResponse::new("vehicle models", models, page))
}

pub async fn get_model(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<VehicleModel>, PosError> {
    let model = state.vehicle_catalog_service().get_model(id).await?;
    Ok(ApiResponse::ok("vehicle model", model))
}

pub async fn update_model(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<VehicleModelPatch>,
) -> Result<ApiResponse<VehicleModel>, PosError> {
    let model = state.vehicle_catalog_service().update_model(id, patch).await?;
    Ok(ApiResponse::ok("vehicle model updated", model))
}

pub async fn delete_model(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.vehicle_catalog_service().delete_model(id).await?;
    Ok(ApiResponse::ok("vehicle model deleted", ()))
}
