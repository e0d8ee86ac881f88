use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use showroom_core::response::{ApiResponse, PaginatedResponse};

use crate::domain::patch::{DamagePatch, InspectionPatch, WorkDetailPatch, WorkOrderPatch};
use crate::domain::stats::{MechanicMetrics, QualityMetrics, RepairDashboard, WorkOrderSummary};
use crate::domain::types::{
    PartsUsage, QualityInspection, VehicleDamage, WorkDetail, WorkOrder, WorkOrderFilter,
};
use crate::error::PosError;
use crate::handlers::extract::{
    AppJson, AppPath, AppQuery, ListQuery, StatusRequest, parse_enum, parse_opt,
};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::repair::{
    AssignInput, CreateDamageInput, CreateInspectionInput, CreatePartsUsageInput,
    CreateWorkDetailInput, CreateWorkOrderInput, ProgressInput, ReworkInput,
};

#[derive(Deserialize)]
pub struct NotesRequest {
    pub notes: Option<String>,
}

// ── Damages ──────────────────────────────────────────────────────────────────

pub async fn create_damage(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateDamageInput>,
) -> Result<ApiResponse<VehicleDamage>, PosError> {
    let damage = state
        .repair_service()
        .create_damage(body, current.user_id)
        .await?;
    Ok(ApiResponse::created("damage recorded", damage))
}

pub async fn list_damages(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(transaction_id), _): AppPath<i64>,
) -> Result<ApiResponse<Vec<VehicleDamage>>, PosError> {
    let damages = state.repair_service().list_damages(transaction_id).await?;
    Ok(ApiResponse::ok("damages", damages))
}

pub async fn get_damage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<VehicleDamage>, PosError> {
    let damage = state.repair_service().get_damage(id).await?;
    Ok(ApiResponse::ok("damage", damage))
}

pub async fn update_damage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<DamagePatch>,
) -> Result<ApiResponse<VehicleDamage>, PosError> {
    let damage = state.repair_service().update_damage(id, patch).await?;
    Ok(ApiResponse::ok("damage updated", damage))
}

pub async fn update_damage_status(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<VehicleDamage>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let damage = state
        .repair_service()
        .update_damage_status(id, status)
        .await?;
    Ok(ApiResponse::ok("damage status updated", damage))
}

pub async fn delete_damage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.repair_service().delete_damage(id).await?;
    Ok(ApiResponse::ok("damage deleted", ()))
}

// ── Work orders ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WorkOrderQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub transaction_id: Option<i64>,
    pub mechanic_id: Option<i64>,
}

pub async fn create_work_order(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateWorkOrderInput>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    let order = state
        .repair_service()
        .create_work_order(body, current.user_id)
        .await?;
    Ok(ApiResponse::created("work order created", order))
}

pub async fn list_work_orders(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
    WithRejection(Query(refs), _): AppQuery<WorkOrderQuery>,
) -> Result<PaginatedResponse<WorkOrder>, PosError> {
    let filter = WorkOrderFilter {
        status: parse_opt("status", refs.status.as_deref())?,
        priority: parse_opt("priority", refs.priority.as_deref())?,
        transaction_id: refs.transaction_id,
        mechanic_id: refs.mechanic_id,
    };
    let page = query.page_request();
    let orders = state.repair_service().list_work_orders(&filter, page).await?;
    Ok(PaginatedResponse::new("work orders", orders, page))
}

pub async fn work_orders_by_mechanic(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(mechanic_id), _): AppPath<i64>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<WorkOrder>, PosError> {
    let page = query.page_request();
    let orders = state
        .repair_service()
        .work_orders_by_mechanic(mechanic_id, page)
        .await?;
    Ok(PaginatedResponse::new("work orders", orders, page))
}

pub async fn get_work_order(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    let order = state.repair_service().get_work_order(id).await?;
    Ok(ApiResponse::ok("work order", order))
}

pub async fn update_work_order(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<WorkOrderPatch>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    let order = state.repair_service().update_work_order(id, patch).await?;
    Ok(ApiResponse::ok("work order updated", order))
}

pub async fn update_work_order_status(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let order = state
        .repair_service()
        .update_work_order_status(id, status, body.notes)
        .await?;
    Ok(ApiResponse::ok("work order status updated", order))
}

pub async fn assign_work_order(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<AssignInput>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    let order = state.repair_service().assign_work_order(id, body).await?;
    Ok(ApiResponse::ok("work order assigned", order))
}

pub async fn approve_work_order(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<WorkOrder>, PosError> {
    current.require_approver()?;
    let decision = parse_enum("status", &body.status)?;
    let order = state
        .repair_service()
        .process_work_order_approval(id, decision, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("work order approval processed", order))
}

pub async fn delete_work_order(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.repair_service().delete_work_order(id).await?;
    Ok(ApiResponse::ok("work order deleted", ()))
}

pub async fn work_order_summary(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<WorkOrderSummary>, PosError> {
    let summary = state.repair_service().work_order_summary(id).await?;
    Ok(ApiResponse::ok("work order summary", summary))
}

pub async fn repair_dashboard(
    _current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<RepairDashboard>, PosError> {
    let stats = state.repair_service().repair_dashboard().await?;
    Ok(ApiResponse::ok("repair dashboard", stats))
}

pub async fn mechanic_metrics(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(mechanic_id), _): AppPath<i64>,
) -> Result<ApiResponse<MechanicMetrics>, PosError> {
    let metrics = state.repair_service().mechanic_metrics(mechanic_id).await?;
    Ok(ApiResponse::ok("mechanic metrics", metrics))
}

// ── Work details ─────────────────────────────────────────────────────────────

pub async fn create_work_detail(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateWorkDetailInput>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let detail = state.repair_service().create_work_detail(body).await?;
    Ok(ApiResponse::created("work detail created", detail))
}

pub async fn list_work_details(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(work_order_id), _): AppPath<i64>,
) -> Result<ApiResponse<Vec<WorkDetail>>, PosError> {
    let details = state.repair_service().list_work_details(work_order_id).await?;
    Ok(ApiResponse::ok("work details", details))
}

pub async fn get_work_detail(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let detail = state.repair_service().get_work_detail(id).await?;
    Ok(ApiResponse::ok("work detail", detail))
}

pub async fn update_work_detail(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<WorkDetailPatch>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let detail = state.repair_service().update_work_detail(id, patch).await?;
    Ok(ApiResponse::ok("work detail updated", detail))
}

pub async fn update_work_detail_status(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let detail = state
        .repair_service()
        .update_work_detail_status(id, status)
        .await?;
    Ok(ApiResponse::ok("work detail status updated", detail))
}

pub async fn update_progress(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<ProgressInput>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let detail = state.repair_service().update_progress(id, body).await?;
    Ok(ApiResponse::ok("progress updated", detail))
}

pub async fn quality_check(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<NotesRequest>,
) -> Result<ApiResponse<WorkDetail>, PosError> {
    let detail = state
        .repair_service()
        .quality_check(id, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("quality check recorded", detail))
}

pub async fn delete_work_detail(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<()>, PosError> {
    state.repair_service().delete_work_detail(id).await?;
    Ok(ApiResponse::ok("work detail deleted", ()))
}

// ── Parts usage ──────────────────────────────────────────────────────────────

pub async fn create_parts_usage(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreatePartsUsageInput>,
) -> Result<ApiResponse<PartsUsage>, PosError> {
    let usage = state
        .repair_service()
        .create_parts_usage(body, current.user_id)
        .await?;
    Ok(ApiResponse::created("parts usage requested", usage))
}

pub async fn list_parts_usage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(work_detail_id), _): AppPath<i64>,
) -> Result<ApiResponse<Vec<PartsUsage>>, PosError> {
    let usage = state.repair_service().list_parts_usage(work_detail_id).await?;
    Ok(ApiResponse::ok("parts usage", usage))
}

pub async fn pending_parts_usage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
) -> Result<PaginatedResponse<PartsUsage>, PosError> {
    let page = query.page_request();
    let usage = state.repair_service().pending_parts_usage(page).await?;
    Ok(PaginatedResponse::new("parts usage pending approval", usage, page))
}

pub async fn get_parts_usage(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<PartsUsage>, PosError> {
    let usage = state.repair_service().get_parts_usage(id).await?;
    Ok(ApiResponse::ok("parts usage", usage))
}

pub async fn approve_parts_usage(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<PartsUsage>, PosError> {
    current.require_approver()?;
    let decision = parse_enum("status", &body.status)?;
    let usage = state
        .repair_service()
        .process_parts_approval(id, decision, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("parts usage approval processed", usage))
}

// ── Quality inspections ──────────────────────────────────────────────────────

pub async fn create_inspection(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateInspectionInput>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    let inspection = state.repair_service().create_inspection(body).await?;
    Ok(ApiResponse::created("inspection scheduled", inspection))
}

pub async fn list_inspections(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(work_order_id), _): AppPath<i64>,
) -> Result<ApiResponse<Vec<QualityInspection>>, PosError> {
    let inspections = state.repair_service().list_inspections(work_order_id).await?;
    Ok(ApiResponse::ok("inspections", inspections))
}

pub async fn get_inspection(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    let inspection = state.repair_service().get_inspection(id).await?;
    Ok(ApiResponse::ok("inspection", inspection))
}

pub async fn update_inspection(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<InspectionPatch>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    let inspection = state.repair_service().update_inspection(id, patch).await?;
    Ok(ApiResponse::ok("inspection updated", inspection))
}

pub async fn update_inspection_status(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    let status = parse_enum("status", &body.status)?;
    let inspection = state
        .repair_service()
        .update_inspection_status(id, status)
        .await?;
    Ok(ApiResponse::ok("inspection status updated", inspection))
}

pub async fn sign_off_inspection(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<StatusRequest>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    current.require_approver()?;
    let decision = parse_enum("status", &body.status)?;
    let inspection = state
        .repair_service()
        .sign_off_inspection(id, decision, body.notes, current.user_id)
        .await?;
    Ok(ApiResponse::ok("inspection signed off", inspection))
}

pub async fn schedule_rework(
    _current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(body), _): AppJson<ReworkInput>,
) -> Result<ApiResponse<QualityInspection>, PosError> {
    let inspection = state.repair_service().schedule_rework(id, body).await?;
    Ok(ApiResponse::ok("rework scheduled", inspection))
}

pub async fn quality_metrics(
    _current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<QualityMetrics>, PosError> {
    let metrics = state.repair_service().quality_metrics().await?;
    Ok(ApiResponse::ok("quality metrics", metrics))
}
