use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database};
use tokio::sync::watch;
use tracing::{info, warn};

use showroom_core::shutdown::shutdown_signal;
use showroom_core::tracing::init_tracing;

use showroom_pos::config::PosConfig;
use showroom_pos::router::build_router;
use showroom_pos::state::AppState;
use showroom_pos::usecase::auth::AuthSettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("showroom_pos=info,tower_http=info");

    let config = PosConfig::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(config.db_connect_timeout)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db: db.clone(),
        auth: Arc::new(AuthSettings {
            jwt_secret: config.jwt_secret.clone(),
            token_ttl: chrono::Duration::from_std(config.token_ttl)
                .context("JWT_TTL_HOURS out of range")?,
        }),
    };

    if let Some(admin) = config.bootstrap_admin.clone() {
        state
            .user_service()
            .bootstrap_admin(admin)
            .await
            .context("failed to bootstrap admin")?;
    }

    let router = build_router(state, config.request_timeout);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("pos service listening on {addr}");

    // Stop accepting on the signal, then give in-flight requests the grace
    // period before dropping them.
    let grace = config.shutdown_grace;
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = stop_tx.send(true);
        })
        .into_future();
    let deadline = async move {
        let _ = stop_rx.wait_for(|stopped| *stopped).await;
        tokio::time::sleep(grace).await;
    };
    tokio::select! {
        result = server => result.context("server error")?,
        () = deadline => warn!(?grace, "shutdown grace period elapsed"),
    }

    db.close().await.context("failed to close database pool")?;
    info!("pos service stopped");
    Ok(())
}
