//! Ledger Store
//!
//! Owns the full `LogStore` in memory and writes it through to the
//! key-value medium after every mutation. Mutators return the affected entry
//! or the day's log as it stands afterwards.

use crate::catalog::CatalogItem;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::types::{DailyLog, FoodEntry, LogStore, MealSlot};
use crate::storage::{load_json, save_json, KeyValueStore, StorageResult, LOGS_KEY};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Hands out entry ids from wall-clock milliseconds, strictly increasing
#[derive(Debug, Default)]
struct EntryIdGenerator {
    last: u64,
}

impl EntryIdGenerator {
    /// Start above every id already present in `logs`
    fn seeded(logs: &LogStore) -> Self {
        let last = logs
            .values()
            .filter_map(DailyLog::max_entry_id)
            .max()
            .unwrap_or(0);
        Self { last }
    }

    fn next(&mut self) -> LedgerResult<u64> {
        let floor = self
            .last
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted(self.last))?;
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let id = now.max(floor);
        self.last = id;
        Ok(id)
    }
}

/// Per-date food log with write-through persistence
pub struct LedgerStore {
    store: Arc<dyn KeyValueStore>,
    logs: LogStore,
    ids: EntryIdGenerator,
}

impl LedgerStore {
    /// Load the persisted logs. A missing key starts an empty ledger.
    pub fn load(store: Arc<dyn KeyValueStore>) -> StorageResult<Self> {
        let logs: LogStore = load_json(&*store, LOGS_KEY)?.unwrap_or_default();
        tracing::info!(days = logs.len(), "Loaded food logs");
        Ok(Self::with_logs(store, logs))
    }

    /// Start from an already loaded `LogStore`
    pub fn with_logs(store: Arc<dyn KeyValueStore>, logs: LogStore) -> Self {
        let ids = EntryIdGenerator::seeded(&logs);
        Self { store, logs, ids }
    }

    /// All stored days
    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    /// Dates that have a stored log, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.logs.keys().copied().collect()
    }

    /// The log for `date`; empty if nothing was logged
    pub fn daily_log(&self, date: NaiveDate) -> DailyLog {
        self.logs.get(&date).cloned().unwrap_or_default()
    }

    /// Log `multiplier` servings of `item` at the end of `slot`
    pub fn add_entry(
        &mut self,
        date: NaiveDate,
        slot: MealSlot,
        item: &CatalogItem,
        multiplier: f64,
    ) -> LedgerResult<FoodEntry> {
        let mut entry = FoodEntry::from_item(0, item, multiplier)?;
        entry.id = self.ids.next()?;
        self.logs
            .entry(date)
            .or_default()
            .entries_mut(slot)
            .push(entry.clone());

        tracing::debug!(
            %date,
            %slot,
            id = entry.id,
            name = %entry.name,
            calories = entry.calories,
            "Added entry"
        );

        self.persist()?;
        Ok(entry)
    }

    /// Remove the entry `id` from `slot`. Unknown ids are ignored.
    pub fn remove_entry(&mut self, date: NaiveDate, slot: MealSlot, id: u64) -> LedgerResult<DailyLog> {
        let removed = self.logs.get_mut(&date).and_then(|log| {
            let entries = log.entries_mut(slot);
            entries
                .iter()
                .position(|e| e.id == id)
                .map(|pos| entries.remove(pos))
        });

        match removed {
            Some(entry) => tracing::debug!(%date, %slot, id, name = %entry.name, "Removed entry"),
            None => tracing::debug!(%date, %slot, id, "No entry to remove"),
        }

        self.persist()?;
        Ok(self.daily_log(date))
    }

    /// Drop the whole log for `date`.
    ///
    /// Callers are expected to have confirmed this with the user.
    pub fn clear_day(&mut self, date: NaiveDate) -> LedgerResult<DailyLog> {
        let removed = self.logs.remove(&date);
        tracing::info!(
            %date,
            entries = removed.as_ref().map(DailyLog::entry_count).unwrap_or(0),
            "Cleared day"
        );

        self.persist()?;
        Ok(DailyLog::new())
    }

    fn persist(&self) -> StorageResult<()> {
        save_json(&*self.store, LOGS_KEY, &self.logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodCatalog;
    use crate::error::ValidationError;
    use crate::ledger::types::{compute_totals, MacroTotals};
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::tempdir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn item(name: &str) -> CatalogItem {
        FoodCatalog::builtin().find(name).unwrap().clone()
    }

    fn create_test_ledger() -> (LedgerStore, MemoryStore) {
        let medium = MemoryStore::new();
        let ledger = LedgerStore::load(Arc::new(medium.clone())).unwrap();
        (ledger, medium)
    }

    #[test]
    fn test_absent_day_is_empty() {
        let (ledger, medium) = create_test_ledger();
        assert_eq!(ledger.daily_log(day()), DailyLog::new());
        assert!(ledger.dates().is_empty());
        assert!(medium.is_empty());
    }

    #[test]
    fn test_add_entry_appends_and_persists() {
        let (mut ledger, medium) = create_test_ledger();

        let gel = ledger
            .add_entry(day(), MealSlot::Training, &item("Energy Gel (Generic)"), 1.0)
            .unwrap();
        let drink = ledger
            .add_entry(day(), MealSlot::Training, &item("Sports Drink Mix (Scoop)"), 2.0)
            .unwrap();

        let log = ledger.daily_log(day());
        let names: Vec<&str> = log
            .entries(MealSlot::Training)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Energy Gel (Generic)", "Sports Drink Mix (Scoop)"]);
        assert_eq!(drink.calories, 160);
        assert!(drink.id > gel.id);

        let persisted: LogStore = load_json(&medium, LOGS_KEY).unwrap().unwrap();
        assert_eq!(persisted, *ledger.logs());
    }

    #[test]
    fn test_add_entry_rejects_bad_multiplier() {
        let (mut ledger, medium) = create_test_ledger();
        let banana = item("Banana (Medium)");

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e12] {
            let result = ledger.add_entry(day(), MealSlot::Breakfast, &banana, bad);
            assert!(matches!(
                result,
                Err(LedgerError::Validation(ValidationError::InvalidMultiplier(_)))
            ));
        }

        assert!(ledger.daily_log(day()).is_empty());
        assert!(medium.is_empty());
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let (mut ledger, _medium) = create_test_ledger();
        let egg = item("Egg (Large)");

        let mut ids: Vec<u64> = (0..50)
            .map(|_| ledger.add_entry(day(), MealSlot::Breakfast, &egg, 1.0).unwrap().id)
            .collect();
        let count = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_ids_seeded_above_stored_ids() {
        let medium = MemoryStore::new();
        let far_future = u64::MAX / 2;
        let mut logs = LogStore::new();
        let mut log = DailyLog::new();
        log.entries_mut(MealSlot::Lunch)
            .push(FoodEntry::from_item(far_future, &item("Tuna (Can)"), 1.0).unwrap());
        logs.insert(day(), log);
        save_json(&medium, LOGS_KEY, &logs).unwrap();

        let mut ledger = LedgerStore::load(Arc::new(medium)).unwrap();
        let entry = ledger
            .add_entry(day(), MealSlot::Lunch, &item("Tuna (Can)"), 1.0)
            .unwrap();
        assert_eq!(entry.id, far_future + 1);
    }

    #[test]
    fn test_add_entry_fails_when_ids_run_out() {
        let medium = MemoryStore::new();
        let mut logs = LogStore::new();
        let mut log = DailyLog::new();
        log.entries_mut(MealSlot::Lunch)
            .push(FoodEntry::from_item(u64::MAX, &item("Tuna (Can)"), 1.0).unwrap());
        logs.insert(day(), log.clone());
        save_json(&medium, LOGS_KEY, &logs).unwrap();
        let stored = medium.get(LOGS_KEY).unwrap();

        let mut ledger = LedgerStore::load(Arc::new(medium.clone())).unwrap();
        let result = ledger.add_entry(day(), MealSlot::Dinner, &item("Egg (Large)"), 1.0);

        assert!(matches!(result, Err(LedgerError::IdsExhausted(u64::MAX))));
        assert_eq!(ledger.daily_log(day()), log);
        assert_eq!(medium.get(LOGS_KEY).unwrap(), stored);
    }

    #[test]
    fn test_remove_entry() {
        let (mut ledger, _medium) = create_test_ledger();
        let banana = ledger
            .add_entry(day(), MealSlot::Breakfast, &item("Banana (Medium)"), 1.0)
            .unwrap();
        ledger
            .add_entry(day(), MealSlot::Breakfast, &item("Oatmeal (1 cup cooked)"), 1.0)
            .unwrap();

        let log = ledger.remove_entry(day(), MealSlot::Breakfast, banana.id).unwrap();
        assert_eq!(log.entries(MealSlot::Breakfast).len(), 1);
        assert_eq!(log.entries(MealSlot::Breakfast)[0].name, "Oatmeal (1 cup cooked)");
        assert_eq!(compute_totals(&log), MacroTotals::new(150, 27, 6, 3));
    }

    #[test]
    fn test_remove_unknown_entry_is_noop() {
        let (mut ledger, _medium) = create_test_ledger();
        let banana = ledger
            .add_entry(day(), MealSlot::Breakfast, &item("Banana (Medium)"), 1.0)
            .unwrap();
        let before = ledger.daily_log(day());

        // Wrong id, wrong slot, wrong date
        assert_eq!(ledger.remove_entry(day(), MealSlot::Breakfast, 42).unwrap(), before);
        assert_eq!(ledger.remove_entry(day(), MealSlot::Lunch, banana.id).unwrap(), before);
        let other_day = day().succ_opt().unwrap();
        assert!(ledger
            .remove_entry(other_day, MealSlot::Breakfast, banana.id)
            .unwrap()
            .is_empty());

        assert_eq!(ledger.daily_log(day()), before);
        assert_eq!(ledger.dates(), vec![day()]);
    }

    #[test]
    fn test_clear_day_matches_never_logged() {
        let (mut ledger, medium) = create_test_ledger();
        let other_day = day().succ_opt().unwrap();
        ledger
            .add_entry(day(), MealSlot::Dinner, &item("Pasta (1 cup cooked)"), 2.0)
            .unwrap();
        ledger
            .add_entry(other_day, MealSlot::Dinner, &item("Pasta (1 cup cooked)"), 1.0)
            .unwrap();

        let snapshot = ledger.clear_day(day()).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(ledger.daily_log(day()), DailyLog::new());
        assert_eq!(ledger.dates(), vec![other_day]);

        let persisted: LogStore = load_json(&medium, LOGS_KEY).unwrap().unwrap();
        assert!(!persisted.contains_key(&day()));
        assert!(persisted.contains_key(&other_day));
    }

    #[test]
    fn test_reload_from_disk() {
        let dir = tempdir().unwrap();
        let medium: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(dir.path()));

        let mut ledger = LedgerStore::load(Arc::clone(&medium)).unwrap();
        ledger
            .add_entry(day(), MealSlot::Snacks, &item("Almonds (Handful)"), 0.5)
            .unwrap();
        ledger
            .add_entry(day(), MealSlot::Lunch, &item("Bagel (Whole)"), 1.25)
            .unwrap();

        let reloaded = LedgerStore::load(medium).unwrap();
        assert_eq!(reloaded.logs(), ledger.logs());
    }
}
