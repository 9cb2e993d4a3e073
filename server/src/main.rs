//! Disaster-management dashboard API server.
//!
//! Run from repo root: `cargo run -p dms-server`
//! Settings come from the environment (or `.env`): DATABASE_URL, BIND_ADDR, DB_MAX_CONNECTIONS,
//! BODY_LIMIT_BYTES, DMS_SEED.

use dms_api::{
    all_resources, app_router, apply_migrations, connect_pool, init_tracing, resolve, seed_if_empty,
    AppState, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    init_tracing();

    let model = resolve(all_resources())?;
    let pool = connect_pool(&settings).await?;
    apply_migrations(&pool, &model).await?;
    if settings.seed {
        let rows = seed_if_empty(&pool, &model).await?;
        tracing::info!(rows, "seed complete");
    }

    let state = AppState {
        pool: pool.clone(),
        model: Arc::new(model),
    };
    let app = app_router(state, &settings);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    pool.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
