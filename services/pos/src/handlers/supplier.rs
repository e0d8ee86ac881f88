use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::SupplierPatch;
use crate::domain::types::Supplier;
use crate::error::PosError;
use crate::handlers::extract::{AppJson, AppPath, AppQuery, ListQuery};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::supplier::CreateSupplierInput;

// ── POST /suppliers ──────────────────────────────────────────────────────────

pub async fn create_supplier(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateSupplierInput>,
) -> Result<ApiResponse<Supplier>, PosError> {
    let created = state.supplier_service().create(body, current.user_id).await?;
    Ok(ApiResponse::created("supplier created", created))
}

// ── GET /suppliers ───────────────────────────────────────────────────────────

pub async fn list_suppliers(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<Supplier>, PosError> {
    let page = query.page_request();
    let items = state
        .supplier_service()
        .list(&query.master_filter(), page)
        .await?;
    Ok(PaginatedResponse::new("suppliers", items, page))
}

// ── GET /suppliers/{id} ──────────────────────────────────────────────────────

pub async fn get_supplier(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<Supplier>, PosError> {
    let found = state.supplier_service().get(id).await?;
    Ok(ApiResponse::ok("supplier", found))
}

// ── PUT /suppliers/{id} ──────────────────────────────────────────────────────

pub async fn update_supplier(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<SupplierPatch>,
) -> Result<ApiResponse<Supplier>, PosError> {
    let updated = state.supplier_service().update(id, patch).await?;
    Ok(ApiResponse::ok("supplier updated", updated))
}

// ── DELETE /suppliers/{id} ───────────────────────────────────────────────────

pub async fn delete_supplier(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.supplier_service().delete(id).await?;
    Ok(ApiResponse::ok("supplier deleted", ()))
}
