use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::TransactionPatch;
use crate::domain::stats::{PeriodStatistics, PurchaseDashboard};
use crate::domain::types::{PurchasePayment, PurchaseTransaction, TransactionFilter};
use crate::error::PosError;
use crate::handlers::extract::{
    AppJson, AppPath, AppQuery, ListQuery, StatusRequest, parse_enum, parse_opt,
};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::vehicle_purchase::{CreatePaymentInput, CreateTransactionInput};

// ── POST /vehicle-purchases ──────────────────────────────────────────────────

pub async fn create_transaction(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateTransactionInput>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state
        .vehicle_purchase_service()
        .create_transaction(body, current.user_id)
        .await?;
    Ok(ApiResponse::created("purchase transaction created", tx))
}

// ── GET /vehicle-purchases ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TransactionQuery {
    pub status: Option<String>,
    pub customer_id: Option<i64>,
}

pub async fn list_transactions(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
    WithRejection(Query(refs), _): AppQuery<TransactionQuery>,
) -> Result<PaginatedResponse<PurchaseTransaction>, PosError> {
    let filter = TransactionFilter {
        status: parse_opt("status", refs.status.as_deref())?,
        customer_id: refs.customer_id,
        search: query.search.clone(),
    };
    let page = query.page_request();
    let txs = state
        .vehicle_purchase_service()
        .list_transactions(&filter, page)
        .await?;
    Ok(PaginatedResponse::new("purchase transactions", txs, page))
}

// ── GET /vehicle-purchases/pending-approval ──────────────────────────────────

pub async fn pending_approval(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<PurchaseTransaction>, PosError> {
    let page = query.page_request();
    let txs = state.vehicle_purchase_service().pending_approval(page).await?;
    Ok(PaginatedResponse::new("transactions pending approval", txs, page))
}

// ── GET /vehicle-purchases/{id} ──────────────────────────────────────────────

pub async fn get_transaction(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state.vehicle_purchase_service().get_transaction(id).await?;
    Ok(ApiResponse::ok("purchase transaction", tx))
}

pub async fn get_transaction_by_number(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(number), _): AppPath<String>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state
        .vehicle_purchase_service()
        .get_transaction_by_number(&number)
        .await?;
    Ok(ApiResponse::ok("purchase transaction", tx))
}

pub async fn get_transaction_by_vin(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(vin), _): AppPath<String>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state
        .vehicle_purchase_service()
        .get_transaction_by_vin(&vin)
        .await?;
    Ok(ApiResponse::ok("purchase transaction", tx))
}

// ── PUT /vehicle-purchases/{id} ──────────────────────────────────────────────

pub async fn update_transaction(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<TransactionPatch>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state
        .vehicle_purchase_service()
        .update_transaction(id, patch)
        .await?;
    Ok(ApiResponse::ok("purchase transaction updated", tx))
}

// ── PUT /vehicle-purchases/{id}/status ───────────────────────────────────────

pub async fn update_status(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let tx = state
        .vehicle_purchase_service()
        .update_status(id, status, body.notes)
        .await?;
    Ok(ApiResponse::ok("transaction status updated", tx))
}

// ── POST /vehicle-purchases/{id}/inspection ──────────────────────────────────

#[derive(Deserialize)]
pub struct InspectionRequest {
    pub condition_rating: i16,
    pub inspection_notes: Option<String>,
}

pub async fn complete_inspection(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<InspectionRequest>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    let tx = state
        .vehicle_purchase_service()
        .complete_inspection(id, body.condition_rating, body.inspection_notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("inspection completed", tx))
}

// ── POST /vehicle-purchases/{id}/approve ─────────────────────────────────────

pub async fn approve_transaction(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<PurchaseTransaction>, PosError> {
    current.require_approver()?;
    let decision = parse_enum("status", &body.status)?;
    let tx = state
        .vehicle_purchase_service()
        .process_approval(id, decision, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("transaction approval processed", tx))
}

// ── DELETE /vehicle-purchases/{id} ───────────────────────────────────────────

pub async fn delete_transaction(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.vehicle_purchase_service().delete_transaction(id).await?;
    Ok(ApiResponse::ok("purchase transaction deleted", ()))
}

// ── GET /vehicle-purchases/{id}/payments ─────────────────────────────────────

pub async fn list_payments(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<Vec<PurchasePayment>>, PosError> {
    let payments = state.vehicle_purchase_service().list_payments(id).await?;
    Ok(ApiResponse::ok("payments", payments))
}

// ── Payments ─────────────────────────────────────────────────────────────────

pub async fn create_payment(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreatePaymentInput>,
) -> Result<ApiResponse<PurchasePayment>, PosError> {
    let payment = state
        .vehicle_purchase_service()
        .create_payment(body, current.user_id)
        .await?;
    Ok(ApiResponse::created("payment created", payment))
}

pub async fn get_payment(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<PurchasePayment>, PosError> {
    let payment = state.vehicle_purchase_service().get_payment(id).await?;
    Ok(ApiResponse::ok("payment", payment))
}

pub async fn process_payment(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<PurchasePayment>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let payment = state
        .vehicle_purchase_service()
        .process_payment(id, status, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("payment processed", payment))
}

pub async fn approve_payment(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<PurchasePayment>, PosError> {
    current.require_approver()?;
    let decision = parse_enum("status", &body.status)?;
    let payment = state
        .vehicle_purchase_service()
        .process_payment_approval(id, decision, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("payment approval processed", payment))
}

// ── Reporting ────────────────────────────────────────────────────────────────

pub async fn dashboard(
    _current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<PurchaseDashboard>, PosError> {
    let stats = state.vehicle_purchase_service().dashboard().await?;
    Ok(ApiResponse::ok("purchase dashboard", stats))
}

#[derive(Deserialize)]
pub struct PeriodQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

pub async fn statistics(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(period), _): AppQuery<PeriodQuery>,
) -> Result<ApiResponse<PeriodStatistics>, PosError> {
    let stats = state
        .vehicle_purchase_service()
        .statistics(period.from, period.to)
        .await?;
    Ok(ApiResponse::ok("purchase statistics", stats))
}
