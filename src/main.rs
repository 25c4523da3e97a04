use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use movies_api::app::{router, AppState};
use movies_api::database::{DatabaseManager, PgMovieRepository, PgRatingRepository};
use movies_api::is_production;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = movies_api::config::config().clone();
    info!("Starting Movies API in {:?} mode", config.environment);

    if is_production!() && (config.security.jwt_secret.is_empty() || config.security.api_key.is_empty()) {
        warn!("JWT_SECRET or API_KEY is empty; every protected request will be rejected");
    }

    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    database.initialize().await.context("failed to initialize the schema")?;

    let pool = database.pool();
    let state = AppState::new(
        config.clone(),
        Arc::new(PgMovieRepository::new(pool.clone())),
        Arc::new(PgRatingRepository::new(pool)),
    );
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Movies API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.close().await;
    info!("Movies API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {}", e);
    }
}
