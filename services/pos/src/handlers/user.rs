use axum::Json;
use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use showroom_core::response::{ApiResponse, PaginatedResponse};
use showroom_domain::user::UserRole;

use crate::domain::patch::UserPatch;
use crate::domain::types::{User, UserFilter};
use crate::error::PosError;
use crate::handlers::extract::{
    AppJson, AppPath, AppQuery, ListQuery, parse_enum, parse_opt,
};
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;
use crate::usecase::user::CreateUserInput;

const ADMIN: &[UserRole] = &[UserRole::Admin];

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
}

pub async fn create_user(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<CreateUserRequest>,
) -> Result<ApiResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    let input = CreateUserInput {
        role: parse_enum("role", &body.role)?,
        username: body.username,
        email: body.email,
        password: body.password,
        full_name: body.full_name,
        phone: body.phone,
    };
    let user = state.user_service().create(input, current.user_id).await?;
    Ok(ApiResponse::created("user created", user))
}

// ── GET /users ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

pub async fn list_users(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Query(query), _): AppQuery<ListQuery>,
    WithRejection(Query(role), _): AppQuery<RoleQuery>,
) -> Result<PaginatedResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    let filter = UserFilter {
        role: parse_opt("role", role.role.as_deref())?,
        is_active: query.is_active,
        search: query.search.clone(),
    };
    let page = query.page_request();
    let users = state.user_service().list(&filter, page).await?;
    Ok(PaginatedResponse::new("users", users, page))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    let user = state.user_service().get(id).await?;
    Ok(ApiResponse::ok("user", user))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

pub async fn update_user(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
    WithRejection(Json(patch), _): AppJson<UserPatch>,
) -> Result<ApiResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    let user = state.user_service().update(id, patch).await?;
    Ok(ApiResponse::ok("user updated", user))
}

// ── POST /users/{id}/deactivate ──────────────────────────────────────────────

pub async fn deactivate_user(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    if id == current.user_id {
        return Err(PosError::validation("id", "cannot deactivate your own account"));
    }
    let user = state.user_service().deactivate(id).await?;
    Ok(ApiResponse::ok("user deactivated", user))
}

// ── POST /users/{id}/activate ────────────────────────────────────────────────

pub async fn activate_user(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Path(id), _): AppPath<i64>,
) -> Result<ApiResponse<User>, PosError> {
    current.require_role(ADMIN)?;
    let user = state.user_service().activate(id).await?;
    Ok(ApiResponse::ok("user activated", user))
}
