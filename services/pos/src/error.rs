use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use showroom_core::error::ErrorBody;
use showroom_domain::UnknownVariant;

/// Entity named by a [`PosError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Session,
    Customer,
    Supplier,
    VehicleBrand,
    VehicleCategory,
    VehicleModel,
    ProductCategory,
    Product,
    Transaction,
    Payment,
    Damage,
    WorkOrder,
    WorkDetail,
    PartsUsage,
    Inspection,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Session => "session",
            Self::Customer => "customer",
            Self::Supplier => "supplier",
            Self::VehicleBrand => "vehicle brand",
            Self::VehicleCategory => "vehicle category",
            Self::VehicleModel => "vehicle model",
            Self::ProductCategory => "product category",
            Self::Product => "product",
            Self::Transaction => "transaction",
            Self::Payment => "payment",
            Self::Damage => "damage",
            Self::WorkOrder => "work order",
            Self::WorkDetail => "work detail",
            Self::PartsUsage => "parts usage",
            Self::Inspection => "quality inspection",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-of-sale service error kinds.
#[derive(Debug, thiserror::Error)]
pub enum PosError {
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("{0}")]
    Conflict(String),
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("{0}")]
    Unauthorized(String),
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PosError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Validation error for a value outside a closed enum.
    pub fn invalid_variant(field: &'static str, err: UnknownVariant) -> Self {
        Self::validation(field, err.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            // A wrong role is answered like a bad token; the kind tells them apart.
            Self::Unauthorized(_) | Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for PosError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<QueryRejection> for PosError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation("query", rejection.body_text())
    }
}

impl From<PathRejection> for PosError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation("path", rejection.body_text())
    }
}

impl IntoResponse for PosError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL_ERROR", "internal error");
        }
        let mut body = ErrorBody::new(self.kind(), self.to_string());
        if let Self::Validation { field, .. } = &self {
            body = body.with_details(serde_json::json!({ "field": field }));
        }
        body.into_response_with(status)
    }
}
