use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fleetbook::config::AppConfig;
use fleetbook::handlers;
use fleetbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = Arc::new(AppState::from_config(AppConfig::from_env())?);
    let port = state.config.port;
    let cors_allow_any = state.config.cors_allow_any;

    let mut app = handlers::router(state).layer(TraceLayer::new_for_http());
    if cors_allow_any {
        tracing::info!("CORS: allowing any origin");
        app = app.layer(CorsLayer::permissive());
    }

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
