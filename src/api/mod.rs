//! Macrolog REST API
//!
//! HTTP API layer for a browser front end, built with Axum.
//!
//! # Endpoints
//!
//! ## Catalog
//! - `GET /api/v1/catalog?q=` - Search built-in foods
//!
//! ## Days
//! - `GET /api/v1/days/:date` - Log, totals and progress for a day (`today` allowed)
//! - `POST /api/v1/days/:date/entries` - Log a food
//! - `DELETE /api/v1/days/:date/entries/:slot/:id` - Remove a logged food
//! - `DELETE /api/v1/days/:date?confirm=true` - Clear a day
//!
//! ## Goals
//! - `GET /api/v1/goals` - Current goals
//! - `PUT /api/v1/goals` - Replace goals
//! - `PATCH /api/v1/goals` - Update some goals
//! - `POST /api/v1/goals/reset` - Restore defaults
//!
//! ## Export
//! - `GET /api/v1/export` - Per-day totals as CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Catalog routes
        .route("/catalog", get(routes::catalog::search_catalog))
        // Day routes
        .route(
            "/days/:date",
            get(routes::days::get_day).delete(routes::days::clear_day),
        )
        .route("/days/:date/entries", post(routes::days::add_entry))
        .route(
            "/days/:date/entries/:slot/:id",
            delete(routes::days::remove_entry),
        )
        // Goal routes
        .route(
            "/goals",
            get(routes::goals::get_goals)
                .put(routes::goals::put_goals)
                .patch(routes::goals::patch_goals),
        )
        .route("/goals/reset", post(routes::goals::reset_goals))
        // Export routes
        .route("/export", get(routes::export::export_totals));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Macrolog API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Macrolog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
