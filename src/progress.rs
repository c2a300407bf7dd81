//! Progress against goals

use crate::goals::Goals;
use crate::ledger::{compute_totals, DailyLog, MacroTotals};
use serde::Serialize;

/// Share of `target` reached, capped at 100. Non-positive targets count as met.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (current / target * 100.0).min(100.0)
}

/// Per-macro progress percentages
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MacroProgress {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroProgress {
    pub fn new(totals: &MacroTotals, goals: &Goals) -> Self {
        let pct = |current: u32, target: u32| progress_percent(current as f64, target as f64);
        Self {
            calories: pct(totals.calories, goals.calories),
            carbs: pct(totals.carbs, goals.carbs),
            protein: pct(totals.protein, goals.protein),
            fat: pct(totals.fat, goals.fat),
        }
    }
}

/// Everything the dashboard shows for one day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayProgress {
    pub totals: MacroTotals,
    pub goals: Goals,
    pub percent: MacroProgress,
    /// Negative once the calorie goal is exceeded
    pub calories_remaining: i64,
    pub over_calorie_goal: bool,
}

impl DayProgress {
    pub fn new(log: &DailyLog, goals: &Goals) -> Self {
        let totals = compute_totals(log);
        Self {
            totals,
            goals: *goals,
            percent: MacroProgress::new(&totals, goals),
            calories_remaining: goals.calories as i64 - totals.calories as i64,
            over_calorie_goal: totals.calories > goals.calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodCatalog;
    use crate::ledger::{LedgerStore, MealSlot};
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0.0, 520.0), 0.0);
        assert_eq!(progress_percent(520.0, 520.0), 100.0);
        assert_eq!(progress_percent(1040.0, 520.0), 100.0);
        assert_eq!(progress_percent(55.0, 110.0), 50.0);
    }

    #[test]
    fn test_progress_percent_non_positive_target() {
        assert_eq!(progress_percent(10.0, 0.0), 100.0);
        assert_eq!(progress_percent(0.0, 0.0), 100.0);
        assert_eq!(progress_percent(10.0, -5.0), 100.0);
    }

    #[test]
    fn test_day_progress() {
        let catalog = FoodCatalog::builtin();
        let mut ledger = LedgerStore::load(Arc::new(MemoryStore::new())).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let bagel = catalog.find("Bagel (Whole)").unwrap();
        ledger.add_entry(date, MealSlot::Breakfast, bagel, 2.0).unwrap();

        let progress = DayProgress::new(&ledger.daily_log(date), &Goals::default());
        assert_eq!(progress.totals, MacroTotals::new(500, 100, 20, 2));
        assert_eq!(progress.calories_remaining, 2900);
        assert!(!progress.over_calorie_goal);
        assert!((progress.percent.calories - 500.0 / 3400.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_over_calorie_goal() {
        let goals = Goals { calories: 1500, ..Goals::default() };
        let catalog = FoodCatalog::builtin();
        let mut ledger = LedgerStore::load(Arc::new(MemoryStore::new())).unwrap();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let pasta = catalog.find("Pasta (1 cup cooked)").unwrap();
        ledger.add_entry(date, MealSlot::Dinner, pasta, 8.0).unwrap();

        let progress = DayProgress::new(&ledger.daily_log(date), &goals);
        assert_eq!(progress.totals.calories, 1760);
        assert_eq!(progress.calories_remaining, -260);
        assert!(progress.over_calorie_goal);
        assert_eq!(progress.percent.calories, 100.0);
    }
}
