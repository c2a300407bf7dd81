//! Goal Routes
//!
//! - GET /api/v1/goals - Current goals
//! - PUT /api/v1/goals - Replace all goals
//! - PATCH /api/v1/goals - Change some goals
//! - POST /api/v1/goals/reset - Restore the defaults

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::goals::{GoalUpdate, Goals};

/// GET /api/v1/goals
pub async fn get_goals(State(state): State<Arc<AppState>>) -> Json<Goals> {
    Json(state.goals.lock().await.goals())
}

/// PUT /api/v1/goals
pub async fn put_goals(
    State(state): State<Arc<AppState>>,
    Json(goals): Json<Goals>,
) -> ApiResult<Json<Goals>> {
    let goals = state.goals.lock().await.set_goals(goals)?;
    tracing::info!(?goals, "Goals replaced");
    Ok(Json(goals))
}

/// PATCH /api/v1/goals
///
/// Merges the given fields into the current goals before saving.
pub async fn patch_goals(
    State(state): State<Arc<AppState>>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goals>> {
    if update.is_empty() {
        return Err(ApiError::Validation("No goal fields given".to_string()));
    }

    let mut store = state.goals.lock().await;
    let merged = store.goals().merged(&update);
    let goals = store.set_goals(merged)?;
    tracing::info!(?goals, "Goals updated");
    Ok(Json(goals))
}

/// POST /api/v1/goals/reset
pub async fn reset_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Goals>> {
    let goals = state.goals.lock().await.reset_to_defaults()?;
    Ok(Json(goals))
}
