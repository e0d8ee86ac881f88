use axum::Json;
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use showroom_auth_types::identity::BearerToken;
use showroom_domain::UnknownVariant;
use showroom_domain::pagination::PageRequest;

use crate::domain::types::MasterFilter;
use crate::error::PosError;
use crate::state::AppState;
use crate::usecase::auth::CurrentUser;

// Rejections of these render as `VALIDATION_ERROR` envelopes.
pub type AppJson<T> = WithRejection<Json<T>, PosError>;
pub type AppQuery<T> = WithRejection<Query<T>, PosError>;
pub type AppPath<T> = WithRejection<Path<T>, PosError>;

/// Bearer token, unchecked. A missing header renders as an `UNAUTHORIZED`
/// envelope rather than a bare status.
#[derive(Debug, Clone)]
pub struct RawToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for RawToken {
    type Rejection = PosError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, PosError> {
        BearerToken::from_parts(parts)
            .map(|t| Self(t.0))
            .ok_or_else(|| PosError::unauthorized("missing bearer token"))
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = PosError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, PosError> {
        let RawToken(token) = RawToken::from_request_parts(parts, state).await?;
        state.auth_service().authenticate(&token).await
    }
}

/// Query string shared by list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.limit),
        )
    }

    pub fn master_filter(&self) -> MasterFilter {
        MasterFilter {
            search: self.search.clone(),
            is_active: self.is_active,
        }
    }
}

/// Parse an optional closed-enum query or body value.
pub fn parse_opt<T>(field: &'static str, value: Option<&str>) -> Result<Option<T>, PosError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    value
        .map(|v| v.parse().map_err(|e| PosError::invalid_variant(field, e)))
        .transpose()
}

/// Parse a required closed-enum body value.
pub fn parse_enum<T>(field: &'static str, value: &str) -> Result<T, PosError>
where
    T: std::str::FromStr<Err = UnknownVariant>,
{
    value
        .parse()
        .map_err(|e| PosError::invalid_variant(field, e))
}

/// Body of approval, status and sign-off actions.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    pub notes: Option<String>,
}
