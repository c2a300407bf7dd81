//! Export Routes
//!
//! - GET /api/v1/export - Per-day totals as a CSV attachment

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::export::daily_totals_csv;

/// GET /api/v1/export
pub async fn export_totals(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let body = {
        let ledger = state.ledger.lock().await;
        daily_totals_csv(ledger.logs()).map_err(|e| ApiError::Internal(e.to_string()))?
    };

    let filename = format!("macrolog_totals_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
