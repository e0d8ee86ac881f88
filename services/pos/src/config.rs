use std::time::Duration;

use anyhow::Context as _;

use crate::usecase::user::BootstrapAdmin;

/// Point-of-sale service configuration loaded from environment variables.
#[derive(Debug)]
pub struct PosConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret for signing access tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Bind address (default 0.0.0.0). Env var: `POS_HOST`.
    pub host: String,
    /// TCP port for the HTTP server (default 8080). Env var: `POS_PORT`.
    pub port: u16,
    /// Access token lifetime (default 24h). Env var: `JWT_TTL_HOURS`.
    pub token_ttl: Duration,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_connect_timeout: Duration,
    /// Per-request timeout (default 30s). Env var: `HTTP_REQUEST_TIMEOUT_SECS`.
    pub request_timeout: Duration,
    /// Time in-flight requests get after a shutdown signal. Env var:
    /// `SHUTDOWN_GRACE_SECS`.
    pub shutdown_grace: Duration,
    /// First administrator, when all three `BOOTSTRAP_ADMIN_*` vars are set.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl PosConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL")?,
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET")?,
            host: std::env::var("POS_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            port: parsed("POS_PORT", 8080),
            token_ttl: Duration::from_secs(parsed("JWT_TTL_HOURS", 24u64) * 3600),
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 20),
            db_min_connections: parsed("DB_MIN_CONNECTIONS", 2),
            db_connect_timeout: Duration::from_secs(parsed("DB_CONNECT_TIMEOUT_SECS", 10)),
            request_timeout: Duration::from_secs(parsed("HTTP_REQUEST_TIMEOUT_SECS", 30)),
            shutdown_grace: Duration::from_secs(parsed("SHUTDOWN_GRACE_SECS", 10)),
            bootstrap_admin: bootstrap_admin(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn bootstrap_admin() -> Option<BootstrapAdmin> {
    let var = |name| std::env::var(name).ok().filter(|v: &String| !v.trim().is_empty());
    Some(BootstrapAdmin {
        username: var("BOOTSTRAP_ADMIN_USERNAME")?,
        email: var("BOOTSTRAP_ADMIN_EMAIL")?,
        password: var("BOOTSTRAP_ADMIN_PASSWORD")?,
    })
}
