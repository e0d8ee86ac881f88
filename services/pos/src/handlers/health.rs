use axum::Json;

use showroom_core::health::{HealthStatus, health_status};

// ── GET /health ──────────────────────────────────────────────────────────────

pub async fn health() -> Json<HealthStatus> {
    Json(health_status(env!("CARGO_PKG_VERSION")))
}
