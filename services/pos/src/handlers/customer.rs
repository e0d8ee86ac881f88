use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::CustomerPatch;
use crate::domain::types::Customer;
use crate::error::PosError;
use crate::handlers::extract::{AppJson, AppPath, AppQuery, ListQuery};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::customer::CreateCustomerInput;

// ── POST /customers ──────────────────────────────────────────────────────────

pub async fn create_customer(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateCustomerInput>,
) -> Result<ApiResponse<Customer>, PosError> {
    let created = state.customer_service().create(body, current.user_id).await?;
    Ok(ApiResponse::created("customer created", created))
}

// ── GET /customers ───────────────────────────────────────────────────────────

pub async fn list_customers(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<Customer>, PosError> {
    let page = query.page_request();
    let items = state
        .customer_service()
        .list(&query.master_filter(), page)
        .await?;
    Ok(PaginatedResponse::new("customers", items, page))
}

// ── GET /customers/{id} ──────────────────────────────────────────────────────

pub async fn get_customer(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<Customer>, PosError> {
    let found = state.customer_service().get(id).await?;
    Ok(ApiResponse::ok("customer", found))
}

// ── PUT /customers/{id} ──────────────────────────────────────────────────────

pub async fn update_customer(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<CustomerPatch>,
) -> Result<ApiResponse<Customer>, PosError> {
    let updated = state.customer_service().update(id, patch).await?;
    Ok(ApiResponse::ok("customer updated", updated))
}

// ── DELETE /customers/{id} ───────────────────────────────────────────────────

pub async fn delete_customer(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.customer_service().delete(id).await?;
    Ok(ApiResponse::ok("customer deleted", ()))
}
