use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use clinicbook::config::AppConfig;
use clinicbook::db;
use clinicbook::handlers;
use clinicbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    tracing::info!(clinic = %config.clinic.name, "booking clinic configured");

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(conn, config));
    let app = handlers::router(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
