//! Day Routes
//!
//! Reading and editing one day's food log.
//!
//! - GET /api/v1/days/:date - Log, totals and progress (`today` allowed)
//! - POST /api/v1/days/:date/entries - Log a food
//! - DELETE /api/v1/days/:date/entries/:slot/:id - Remove a logged food
//! - DELETE /api/v1/days/:date?confirm=true - Clear the whole day

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::dto::{
    AddEntryRequest, AddEntryResponse, ClearDayParams, DaySummaryResponse, MealSummary,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::catalog::{build_custom_item, CatalogItem};
use crate::date::parse_log_date;
use crate::goals::Goals;
use crate::ledger::{compute_totals, DailyLog, MealSlot};
use crate::progress::DayProgress;

/// GET /api/v1/days/:date
pub async fn get_day(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> ApiResult<Json<DaySummaryResponse>> {
    let date = resolve_date(&state, &date)?;
    let log = state.ledger.lock().await.daily_log(date);
    let goals = state.goals.lock().await.goals();

    Ok(Json(day_summary(date, log, &goals)))
}

/// POST /api/v1/days/:date/entries
///
/// Log `servings` of a catalog food or a custom food.
pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Json(req): Json<AddEntryRequest>,
) -> ApiResult<(StatusCode, Json<AddEntryResponse>)> {
    let date = resolve_date(&state, &date)?;
    let slot: MealSlot = req.slot.parse()?;
    let item = resolve_item(&state, &req)?;

    let mut ledger = state.ledger.lock().await;
    let entry = ledger.add_entry(date, slot, &item, req.servings)?;
    let totals = compute_totals(&ledger.daily_log(date));

    tracing::info!(%date, %slot, entry_id = entry.id, name = %entry.name, "Logged food");

    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse {
            date: date.to_string(),
            slot,
            entry,
            totals,
        }),
    ))
}

/// DELETE /api/v1/days/:date/entries/:slot/:id
///
/// Unknown ids are ignored; the day is returned either way.
pub async fn remove_entry(
    State(state): State<Arc<AppState>>,
    Path((date, slot, id)): Path<(String, String, u64)>,
) -> ApiResult<Json<DaySummaryResponse>> {
    let date = resolve_date(&state, &date)?;
    let slot: MealSlot = slot.parse()?;

    let log = state.ledger.lock().await.remove_entry(date, slot, id)?;
    let goals = state.goals.lock().await.goals();

    Ok(Json(day_summary(date, log, &goals)))
}

/// DELETE /api/v1/days/:date?confirm=true
pub async fn clear_day(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Query(params): Query<ClearDayParams>,
) -> ApiResult<StatusCode> {
    let date = resolve_date(&state, &date)?;
    if !params.confirm {
        return Err(ApiError::Validation(
            "Clearing a day requires confirm=true".to_string(),
        ));
    }

    state.ledger.lock().await.clear_day(date)?;
    Ok(StatusCode::NO_CONTENT)
}

fn resolve_date(state: &AppState, raw: &str) -> ApiResult<NaiveDate> {
    Ok(parse_log_date(raw, state.date_source.as_ref())?)
}

fn resolve_item(state: &AppState, req: &AddEntryRequest) -> ApiResult<CatalogItem> {
    match (&req.food, &req.custom) {
        (Some(name), None) => state
            .catalog
            .find(name)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Food '{}' is not in the catalog", name))),
        (None, Some(form)) => Ok(build_custom_item(form)?),
        _ => Err(ApiError::Validation(
            "Provide exactly one of 'food' or 'custom'".to_string(),
        )),
    }
}

fn day_summary(date: NaiveDate, log: DailyLog, goals: &Goals) -> DaySummaryResponse {
    let meals = log
        .slots()
        .map(|(slot, entries)| MealSummary {
            slot,
            label: slot.label().to_string(),
            calories: log.slot_calories(slot),
            entries: entries.len(),
        })
        .collect();
    let progress = DayProgress::new(&log, goals);

    DaySummaryResponse {
        date: date.to_string(),
        log,
        meals,
        progress,
    }
}
