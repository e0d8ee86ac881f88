use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use showroom_core::response::ApiResponse;

use crate::domain::types::{Session, User};
use crate::error::PosError;
use crate::handlers::extract::{AppJson, RawToken};
use crate::state::AppState;
use crate::usecase::auth::{ChangePasswordInput, CurrentUser, IssuedToken, LoginInput, LoginOutput};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Json(body), _): AppJson<LoginRequest>,
) -> Result<ApiResponse<LoginOutput>, PosError> {
    let output = state
        .auth_service()
        .login(LoginInput {
            username: body.username,
            password: body.password,
            ip_address: client_ip(&headers),
            user_agent: header_text(&headers, USER_AGENT.as_str()),
        })
        .await?;
    Ok(ApiResponse::ok("login successful", output))
}

// ── POST /auth/refresh ───────────────────────────────────────────────────────

pub async fn refresh(
    State(state): State<AppState>,
    RawToken(token): RawToken,
) -> Result<ApiResponse<IssuedToken>, PosError> {
    let issued = state.auth_service().refresh(&token).await?;
    Ok(ApiResponse::ok("token refreshed", issued))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<()>, PosError> {
    state.auth_service().logout(&current).await?;
    Ok(ApiResponse::ok("logout successful", ()))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<User>, PosError> {
    let user = state.auth_service().me(current.user_id).await?;
    Ok(ApiResponse::ok("current user", user))
}

// ── POST /auth/change-password ───────────────────────────────────────────────

pub async fn change_password(
    current: CurrentUser,
    State(state): State<AppState>,
    WithRejection(Json(body), _): AppJson<ChangePasswordInput>,
) -> Result<ApiResponse<()>, PosError> {
    state
        .auth_service()
        .change_password(current.user_id, body)
        .await?;
    Ok(ApiResponse::ok("password changed, please log in again", ()))
}

// ── GET /auth/sessions ───────────────────────────────────────────────────────

pub async fn sessions(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Session>>, PosError> {
    let sessions = state.auth_service().sessions(current.user_id).await?;
    Ok(ApiResponse::ok("active sessions", sessions))
}

// ── POST /auth/revoke-all ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RevokedResponse {
    pub revoked: u64,
}

pub async fn revoke_all(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<ApiResponse<RevokedResponse>, PosError> {
    let revoked = state.auth_service().revoke_all(current.user_id).await?;
    Ok(ApiResponse::ok("sessions revoked", RevokedResponse { revoked }))
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_text(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next().map(|ip| ip.trim().to_owned()))
        .filter(|ip| !ip.is_empty())
        .or_else(|| header_text(headers, "x-real-ip"))
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
