//! TechFix AI Site Server
//!
//! Serves the built landing-page assets with a single-page-app fallback:
//! any path that does not match a file gets `index.html` so client-side
//! routes survive a reload. Also exposes `/health` with backend
//! reachability for uptime checks.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use techfix_api::BackendClient;

#[derive(Clone)]
struct AppState {
    backend: Arc<BackendClient>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    backend_reachable: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend_reachable = state.backend.health_check().await;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        backend_reachable,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    let dist: PathBuf = std::env::var("DIST_DIR")
        .unwrap_or_else(|_| "dist".into())
        .into();

    if !dist.join("index.html").exists() {
        tracing::warn!("⚠ {}/index.html not found - build the site first", dist.display());
    }

    let backend = Arc::new(BackendClient::from_env()?);
    let state = AppState { backend };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Unmatched paths fall back to index.html (client-side routing)
    let spa = ServeDir::new(&dist).not_found_service(ServeFile::new(dist.join("index.html")));

    let app = Router::new()
        .route("/health", get(health_check))
        .fallback_service(spa)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 TechFix AI site running on http://{}", addr);
    tracing::info!("  Serving {} with SPA fallback", dist.display());

    axum::serve(listener, app).await?;

    Ok(())
}
