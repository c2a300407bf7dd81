//! Core data types for the nutrition ledger
//!
//! - `MealSlot`: the five fixed meal categories
//! - `FoodEntry`: one logged food, macros already scaled by its serving multiplier
//! - `DailyLog`: entries per meal slot for one day
//! - `MacroTotals`: summed calories and macros

use crate::catalog::{CatalogItem, DEFAULT_SERVING_UNIT};
use crate::error::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meal a food is logged under
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    /// Food eaten on the bike
    Training,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    /// All slots in display order
    pub fn all() -> &'static [MealSlot] {
        &[
            MealSlot::Breakfast,
            MealSlot::Training,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snacks,
        ]
    }

    /// Stable identifier used in storage and URLs
    pub fn id(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Training => "training",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Training => "Training Fuel",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snacks => "Snacks",
        }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for MealSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MealSlot::all()
            .iter()
            .copied()
            .find(|slot| slot.id() == needle)
            .ok_or_else(|| ValidationError::UnknownMealSlot(s.to_string()))
    }
}

/// A logged food.
///
/// Macros are scaled by `serving_multiplier` once, when the entry is created,
/// and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Unique within a day's log
    pub id: u64,
    pub name: String,
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
    #[serde(alias = "originalServing", default = "default_multiplier")]
    pub serving_multiplier: f64,
    #[serde(default = "default_serving_unit")]
    pub serving_unit: String,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_serving_unit() -> String {
    DEFAULT_SERVING_UNIT.to_string()
}

impl FoodEntry {
    /// Scale a single-serving item by `multiplier`.
    ///
    /// Calories and each macro are rounded independently, so the rounded
    /// calories need not equal 4·carbs + 4·protein + 9·fat.
    ///
    /// The multiplier must be positive and finite, and every scaled value must
    /// fit in a `u32`.
    pub fn from_item(id: u64, item: &CatalogItem, multiplier: f64) -> Result<Self, ValidationError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ValidationError::InvalidMultiplier(multiplier));
        }
        let scaled =
            |value: u32| scale(value, multiplier).ok_or(ValidationError::InvalidMultiplier(multiplier));

        Ok(Self {
            id,
            name: item.name.clone(),
            calories: scaled(item.calories)?,
            carbs: scaled(item.carbs)?,
            protein: scaled(item.protein)?,
            fat: scaled(item.fat)?,
            serving_multiplier: multiplier,
            serving_unit: item.serving_unit.clone(),
        })
    }

    pub fn macros(&self) -> MacroTotals {
        MacroTotals {
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
        }
    }
}

fn scale(value: u32, multiplier: f64) -> Option<u32> {
    let scaled = (value as f64 * multiplier).round();
    (scaled <= u32::MAX as f64).then_some(scaled as u32)
}

/// One day of logged food, by meal slot.
///
/// A slot missing from a stored blob reads as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyLog {
    #[serde(default)]
    breakfast: Vec<FoodEntry>,
    #[serde(default)]
    training: Vec<FoodEntry>,
    #[serde(default)]
    lunch: Vec<FoodEntry>,
    #[serde(default)]
    dinner: Vec<FoodEntry>,
    #[serde(default)]
    snacks: Vec<FoodEntry>,
}

impl DailyLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of `slot` in insertion order
    pub fn entries(&self, slot: MealSlot) -> &[FoodEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Training => &self.training,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub(crate) fn entries_mut(&mut self, slot: MealSlot) -> &mut Vec<FoodEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Training => &mut self.training,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }

    /// Slots with their entries, in display order
    pub fn slots(&self) -> impl Iterator<Item = (MealSlot, &[FoodEntry])> {
        MealSlot::all().iter().map(move |&slot| (slot, self.entries(slot)))
    }

    /// Every entry across all slots
    pub fn all_entries(&self) -> impl Iterator<Item = &FoodEntry> {
        self.slots().flat_map(|(_, entries)| entries.iter())
    }

    pub fn entry_count(&self) -> usize {
        self.slots().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Calorie subtotal of one meal
    pub fn slot_calories(&self, slot: MealSlot) -> u32 {
        self.entries(slot)
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.calories))
    }

    /// Largest entry id in this log
    pub fn max_entry_id(&self) -> Option<u64> {
        self.all_entries().map(|e| e.id).max()
    }
}

/// All logged days, keyed by date
pub type LogStore = BTreeMap<NaiveDate, DailyLog>;

/// Summed calories and macros
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroTotals {
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

impl MacroTotals {
    pub fn new(calories: u32, carbs: u32, protein: u32, fat: u32) -> Self {
        Self {
            calories,
            carbs,
            protein,
            fat,
        }
    }
}

impl std::ops::Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, rhs: MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: self.calories.saturating_add(rhs.calories),
            carbs: self.carbs.saturating_add(rhs.carbs),
            protein: self.protein.saturating_add(rhs.protein),
            fat: self.fat.saturating_add(rhs.fat),
        }
    }
}

impl std::iter::Sum for MacroTotals {
    fn sum<I: Iterator<Item = MacroTotals>>(iter: I) -> Self {
        iter.fold(MacroTotals::default(), |acc, t| acc + t)
    }
}

/// Sum calories and macros over every entry in every slot
pub fn compute_totals(log: &DailyLog) -> MacroTotals {
    log.all_entries().map(FoodEntry::macros).sum()
}
