//! End-to-end ledger scenarios against an on-disk store

use chrono::NaiveDate;
use macrolog::catalog::FoodCatalog;
use macrolog::goals::{GoalStore, Goals};
use macrolog::ledger::{compute_totals, DailyLog, LedgerStore, MacroTotals, MealSlot};
use macrolog::progress::DayProgress;
use macrolog::storage::{FileStore, KeyValueStore, GOALS_KEY, LOGS_KEY};
use std::sync::Arc;
use tempfile::tempdir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn open(dir: &std::path::Path) -> (LedgerStore, GoalStore, Arc<dyn KeyValueStore>) {
    let medium: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir));
    let ledger = LedgerStore::load(Arc::clone(&medium)).unwrap();
    let goals = GoalStore::load(Arc::clone(&medium)).unwrap();
    (ledger, goals, medium)
}

#[test]
fn test_banana_and_chicken_day() {
    let dir = tempdir().unwrap();
    let (mut ledger, goals, _medium) = open(dir.path());
    let catalog = FoodCatalog::builtin();

    assert_eq!(goals.goals().calories, 3400);

    let banana = catalog.find("Banana (Medium)").unwrap();
    let chicken = catalog.find("Chicken Breast (100g)").unwrap();

    let banana_entry = ledger.add_entry(day(), MealSlot::Breakfast, banana, 1.0).unwrap();
    ledger.add_entry(day(), MealSlot::Lunch, chicken, 2.0).unwrap();

    let totals = compute_totals(&ledger.daily_log(day()));
    assert_eq!(totals, MacroTotals::new(435, 27, 63, 6));

    let log = ledger
        .remove_entry(day(), MealSlot::Breakfast, banana_entry.id)
        .unwrap();
    assert_eq!(compute_totals(&log), MacroTotals::new(330, 0, 62, 6));

    let progress = DayProgress::new(&log, &goals.goals());
    assert_eq!(progress.calories_remaining, 3070);
}

#[test]
fn test_totals_equal_sum_of_added_entries() {
    let dir = tempdir().unwrap();
    let (mut ledger, _goals, _medium) = open(dir.path());
    let catalog = FoodCatalog::builtin();

    let mut expected = MacroTotals::default();
    let multipliers = [0.25, 0.5, 1.0, 1.25, 1.75, 2.0, 3.0];

    for (i, item) in catalog.items().iter().enumerate() {
        let slot = MealSlot::all()[i % MealSlot::all().len()];
        let multiplier = multipliers[i % multipliers.len()];
        let entry = ledger.add_entry(day(), slot, item, multiplier).unwrap();

        assert_eq!(entry.calories, (item.calories as f64 * multiplier).round() as u32);
        assert_eq!(entry.carbs, (item.carbs as f64 * multiplier).round() as u32);
        assert_eq!(entry.protein, (item.protein as f64 * multiplier).round() as u32);
        assert_eq!(entry.fat, (item.fat as f64 * multiplier).round() as u32);

        expected = expected + entry.macros();
    }

    assert_eq!(compute_totals(&ledger.daily_log(day())), expected);
}

#[test]
fn test_state_survives_restart() {
    let dir = tempdir().unwrap();
    let catalog = FoodCatalog::builtin();
    let custom_goals = Goals {
        calories: 3000,
        carbs: 450,
        protein: 120,
        fat: 80,
    };

    let saved_logs = {
        let (mut ledger, mut goals, _medium) = open(dir.path());
        let gel = catalog.find("Energy Gel (Generic)").unwrap();
        let rice = catalog.find("Rice Cake (Homemade)").unwrap();
        ledger.add_entry(day(), MealSlot::Training, gel, 3.0).unwrap();
        ledger.add_entry(day(), MealSlot::Training, rice, 1.5).unwrap();
        ledger
            .add_entry(day().succ_opt().unwrap(), MealSlot::Dinner, rice, 1.0)
            .unwrap();
        goals.set_goals(custom_goals).unwrap();
        ledger.logs().clone()
    };

    let (ledger, goals, medium) = open(dir.path());
    assert_eq!(ledger.logs(), &saved_logs);
    assert_eq!(goals.goals(), custom_goals);
    assert!(medium.get(LOGS_KEY).unwrap().is_some());
    assert!(medium.get(GOALS_KEY).unwrap().is_some());
}

#[test]
fn test_cleared_day_reads_like_never_logged() {
    let dir = tempdir().unwrap();
    let catalog = FoodCatalog::builtin();

    {
        let (mut ledger, _goals, _medium) = open(dir.path());
        let bagel = catalog.find("Bagel (Whole)").unwrap();
        ledger.add_entry(day(), MealSlot::Breakfast, bagel, 1.0).unwrap();
        ledger.clear_day(day()).unwrap();
    }

    let (ledger, _goals, _medium) = open(dir.path());
    let never_logged = day().succ_opt().unwrap();
    assert_eq!(ledger.daily_log(day()), DailyLog::new());
    assert_eq!(ledger.daily_log(day()), ledger.daily_log(never_logged));
    assert!(ledger.dates().is_empty());
}

#[test]
fn test_reads_blob_written_by_the_web_app() {
    let dir = tempdir().unwrap();
    let medium = FileStore::new(dir.path());
    medium
        .put(
            LOGS_KEY,
            r#"{"2024-05-31":{"breakfast":[{"id":1717142400000,"name":"Oatmeal (1 cup cooked)","calories":225,"carbs":41,"protein":9,"fat":5,"originalServing":1.5,"servingUnit":"cup"}],"lunch":[],"dinner":[],"snacks":[],"training":[]}}"#,
        )
        .unwrap();
    medium
        .put(GOALS_KEY, r#"{"calories":3600,"carbs":560,"protein":115,"fat":90}"#)
        .unwrap();

    let (mut ledger, goals, _medium) = open(dir.path());
    let date = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let log = ledger.daily_log(date);
    assert_eq!(log.entries(MealSlot::Breakfast)[0].serving_multiplier, 1.5);
    assert_eq!(compute_totals(&log), MacroTotals::new(225, 41, 9, 5));
    assert_eq!(goals.goals().calories, 3600);

    // New ids never collide with imported ones
    let egg = FoodCatalog::builtin().find("Egg (Large)").unwrap().clone();
    let entry = ledger.add_entry(date, MealSlot::Breakfast, &egg, 2.0).unwrap();
    assert!(entry.id > 1717142400000);
}
