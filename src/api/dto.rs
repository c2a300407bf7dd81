//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, CustomFoodForm};
use crate::ledger::{DailyLog, FoodEntry, MacroTotals, MealSlot};
use crate::progress::DayProgress;

// ============================================
// CATALOG DTOs
// ============================================

/// Catalog search parameters
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive name fragment; empty returns everything
    #[serde(default)]
    pub q: String,
}

/// Catalog search response
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub total: usize,
    pub items: Vec<CatalogItem>,
}

// ============================================
// DAY DTOs
// ============================================

/// Calorie subtotal of one meal
#[derive(Debug, Serialize)]
pub struct MealSummary {
    pub slot: MealSlot,
    pub label: String,
    pub calories: u32,
    pub entries: usize,
}

/// Everything shown for one day
#[derive(Debug, Serialize)]
pub struct DaySummaryResponse {
    /// YYYY-MM-DD
    pub date: String,
    pub log: DailyLog,
    pub meals: Vec<MealSummary>,
    pub progress: DayProgress,
}

/// Add a food to a meal.
///
/// Exactly one of `food` (catalog name) or `custom` must be given.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub slot: String,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub custom: Option<CustomFoodForm>,
    /// Serving multiplier
    #[serde(default = "default_servings")]
    pub servings: f64,
}

fn default_servings() -> f64 {
    1.0
}

/// Add entry response
#[derive(Debug, Serialize)]
pub struct AddEntryResponse {
    pub date: String,
    pub slot: MealSlot,
    pub entry: FoodEntry,
    /// Day totals after the add
    pub totals: MacroTotals,
}

/// Clear-day parameters
#[derive(Debug, Default, Deserialize)]
pub struct ClearDayParams {
    /// Must be true; the client is expected to have asked the user
    #[serde(default)]
    pub confirm: bool,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub days_logged: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
