//! Goal Store
//!
//! Daily calorie and macro targets. A single process-wide value, persisted
//! wholesale under its own key.
//!
//! Settings forms edit a [`GoalDraft`]; nothing is written until the draft is
//! committed.

use crate::error::{LedgerResult, ValidationError};
use crate::storage::{load_json, save_json, KeyValueStore, StorageResult, GOALS_KEY};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Daily targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goals {
    /// kcal
    pub calories: u32,
    /// grams
    pub carbs: u32,
    /// grams
    pub protein: u32,
    /// grams
    pub fat: u32,
}

impl Default for Goals {
    /// Targets for a ~62kg endurance cyclist training around 3h a day
    fn default() -> Self {
        Self {
            calories: 3400,
            carbs: 520,
            protein: 110,
            fat: 85,
        }
    }
}

/// Allowed range (and form step) for one goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalBounds {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

impl GoalBounds {
    pub const CALORIES: GoalBounds = GoalBounds { min: 1500, max: 6000, step: 50 };
    pub const CARBS: GoalBounds = GoalBounds { min: 50, max: 800, step: 10 };
    pub const PROTEIN: GoalBounds = GoalBounds { min: 40, max: 300, step: 5 };
    pub const FAT: GoalBounds = GoalBounds { min: 20, max: 200, step: 5 };

    fn check(&self, field: &'static str, value: u32) -> Result<(), ValidationError> {
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::GoalOutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Goals {
    /// Check every target against its range
    pub fn validate(&self) -> Result<(), ValidationError> {
        GoalBounds::CALORIES.check("calories", self.calories)?;
        GoalBounds::CARBS.check("carbs", self.carbs)?;
        GoalBounds::PROTEIN.check("protein", self.protein)?;
        GoalBounds::FAT.check("fat", self.fat)?;
        Ok(())
    }

    /// Apply the fields present in `update`
    pub fn merged(mut self, update: &GoalUpdate) -> Self {
        if let Some(calories) = update.calories {
            self.calories = calories;
        }
        if let Some(carbs) = update.carbs {
            self.carbs = carbs;
        }
        if let Some(protein) = update.protein {
            self.protein = protein;
        }
        if let Some(fat) = update.fat {
            self.fat = fat;
        }
        self
    }
}

/// Partial goal edit
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct GoalUpdate {
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub fat: Option<u32>,
}

impl GoalUpdate {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none() && self.carbs.is_none() && self.protein.is_none() && self.fat.is_none()
    }
}

/// Current goals with write-through persistence
pub struct GoalStore {
    store: Arc<dyn KeyValueStore>,
    goals: Goals,
}

impl GoalStore {
    /// Load persisted goals, falling back to the defaults
    pub fn load(store: Arc<dyn KeyValueStore>) -> StorageResult<Self> {
        let goals = match load_json::<Goals>(&*store, GOALS_KEY)? {
            Some(goals) => goals,
            None => {
                tracing::info!("No saved goals, using defaults");
                Goals::default()
            }
        };
        Ok(Self::with_goals(store, goals))
    }

    pub fn with_goals(store: Arc<dyn KeyValueStore>, goals: Goals) -> Self {
        Self { store, goals }
    }

    pub fn goals(&self) -> Goals {
        self.goals
    }

    /// Replace the goals wholesale
    pub fn set_goals(&mut self, goals: Goals) -> LedgerResult<Goals> {
        goals.validate()?;
        self.goals = goals;
        tracing::debug!(?goals, "Goals updated");
        save_json(&*self.store, GOALS_KEY, &self.goals)?;
        Ok(self.goals)
    }

    /// Commit the default goals
    pub fn reset_to_defaults(&mut self) -> LedgerResult<Goals> {
        tracing::info!("Resetting goals to defaults");
        self.set_goals(Goals::default())
    }

    /// Start an editable preview of the current goals
    pub fn draft(&self) -> GoalDraft {
        GoalDraft::new(self.goals)
    }
}

/// Editable copy of the goals. Changes stay local until [`GoalDraft::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalDraft {
    goals: Goals,
}

impl GoalDraft {
    pub fn new(goals: Goals) -> Self {
        Self { goals }
    }

    pub fn goals(&self) -> Goals {
        self.goals
    }

    pub fn apply(&mut self, update: &GoalUpdate) {
        self.goals = self.goals.merged(update);
    }

    /// Preview the defaults without saving them
    pub fn reset(&mut self) {
        self.goals = Goals::default();
    }

    /// Save the draft into `store`
    pub fn commit(self, store: &mut GoalStore) -> LedgerResult<Goals> {
        store.set_goals(self.goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::storage::MemoryStore;

    fn create_test_store() -> (GoalStore, MemoryStore) {
        let medium = MemoryStore::new();
        let store = GoalStore::load(Arc::new(medium.clone())).unwrap();
        (store, medium)
    }

    fn saved(medium: &MemoryStore) -> Option<Goals> {
        load_json(medium, GOALS_KEY).unwrap()
    }

    #[test]
    fn test_defaults_when_nothing_saved() {
        let (store, medium) = create_test_store();
        assert_eq!(store.goals(), Goals { calories: 3400, carbs: 520, protein: 110, fat: 85 });
        assert!(saved(&medium).is_none());
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Goals::default().validate().is_ok());
    }

    #[test]
    fn test_set_goals_persists() {
        let (mut store, medium) = create_test_store();
        let goals = Goals { calories: 2800, carbs: 400, protein: 140, fat: 70 };

        store.set_goals(goals).unwrap();
        assert_eq!(store.goals(), goals);
        assert_eq!(saved(&medium), Some(goals));

        let reloaded = GoalStore::load(Arc::new(medium)).unwrap();
        assert_eq!(reloaded.goals(), goals);
    }

    #[test]
    fn test_set_goals_rejects_out_of_range() {
        let (mut store, medium) = create_test_store();
        let goals = Goals { fat: 5, ..Goals::default() };

        let result = store.set_goals(goals);
        assert!(matches!(
            result,
            Err(LedgerError::Validation(ValidationError::GoalOutOfRange { field: "fat", .. }))
        ));
        assert_eq!(store.goals(), Goals::default());
        assert!(saved(&medium).is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let low = Goals { calories: 1500, carbs: 50, protein: 40, fat: 20 };
        let high = Goals { calories: 6000, carbs: 800, protein: 300, fat: 200 };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
        assert!(Goals { calories: 6001, ..high }.validate().is_err());
        assert!(Goals { calories: 0, ..low }.validate().is_err());
    }

    #[test]
    fn test_merged_keeps_missing_fields() {
        let update = GoalUpdate { carbs: Some(600), ..Default::default() };
        let merged = Goals::default().merged(&update);
        assert_eq!(merged, Goals { carbs: 600, ..Goals::default() });
        assert!(!update.is_empty());
        assert!(GoalUpdate::default().is_empty());
    }

    #[test]
    fn test_reset_to_defaults_commits() {
        let (mut store, medium) = create_test_store();
        store
            .set_goals(Goals { calories: 2000, carbs: 250, protein: 90, fat: 60 })
            .unwrap();

        let goals = store.reset_to_defaults().unwrap();
        assert_eq!(goals, Goals::default());
        assert_eq!(saved(&medium), Some(Goals::default()));
    }

    #[test]
    fn test_draft_only_persists_on_commit() {
        let (mut store, medium) = create_test_store();

        let mut draft = store.draft();
        draft.apply(&GoalUpdate { calories: Some(3000), ..Default::default() });
        draft.apply(&GoalUpdate { protein: Some(130), ..Default::default() });
        assert_eq!(store.goals(), Goals::default());
        assert!(saved(&medium).is_none());

        let committed = draft.commit(&mut store).unwrap();
        assert_eq!(committed, Goals { calories: 3000, protein: 130, ..Goals::default() });
        assert_eq!(saved(&medium), Some(committed));
    }

    #[test]
    fn test_draft_reset_is_a_preview() {
        let custom = Goals { calories: 2500, carbs: 300, protein: 120, fat: 80 };
        let (mut store, medium) = create_test_store();
        store.set_goals(custom).unwrap();

        let mut draft = store.draft();
        draft.reset();
        assert_eq!(draft.goals(), Goals::default());
        assert_eq!(store.goals(), custom);
        assert_eq!(saved(&medium), Some(custom));
    }
}
