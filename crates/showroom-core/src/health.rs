use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

/// Liveness payload for a service built at `version`.
pub fn health_status(version: &'static str) -> HealthStatus {
    HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
        version,
    }
}
