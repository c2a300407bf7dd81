//! Food Catalog
//!
//! The built-in, read-only list of foods with per-serving macros, plus
//! validation of user-entered custom foods. Both produce a [`CatalogItem`],
//! which is the only input the ledger accepts when logging food.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Serving unit used when none is given
pub const DEFAULT_SERVING_UNIT: &str = "serving";

/// Food group used to organize the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FoodGroup {
    /// On-bike fuel (gels, drink mix, bars)
    Training,
    Produce,
    Grains,
    Protein,
    Fat,
    /// User-entered food
    Custom,
}

impl std::fmt::Display for FoodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoodGroup::Training => write!(f, "training"),
            FoodGroup::Produce => write!(f, "produce"),
            FoodGroup::Grains => write!(f, "grains"),
            FoodGroup::Protein => write!(f, "protein"),
            FoodGroup::Fat => write!(f, "fat"),
            FoodGroup::Custom => write!(f, "custom"),
        }
    }
}

/// Macro profile of a single serving of a food
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    /// Energy in kcal
    pub calories: u32,
    /// Carbohydrates in grams
    pub carbs: u32,
    /// Protein in grams
    pub protein: u32,
    /// Fat in grams
    pub fat: u32,
    /// What one serving is (e.g. "gel", "cup", "100g")
    pub serving_unit: String,
    pub group: FoodGroup,
}

impl CatalogItem {
    pub fn new(
        name: impl Into<String>,
        calories: u32,
        carbs: u32,
        protein: u32,
        fat: u32,
        serving_unit: impl Into<String>,
        group: FoodGroup,
    ) -> Self {
        Self {
            name: name.into(),
            calories,
            carbs,
            protein,
            fat,
            serving_unit: serving_unit.into(),
            group,
        }
    }
}

// name, kcal, carbs, protein, fat, unit, group
const BUILTIN_FOODS: &[(&str, u32, u32, u32, u32, &str, FoodGroup)] = &[
    ("Energy Gel (Generic)", 100, 25, 0, 0, "gel", FoodGroup::Training),
    ("Banana (Medium)", 105, 27, 1, 0, "banana", FoodGroup::Produce),
    ("Rice Cake (Homemade)", 150, 30, 2, 2, "cake", FoodGroup::Training),
    ("Sports Drink Mix (Scoop)", 80, 20, 0, 0, "scoop", FoodGroup::Training),
    ("Clif Bar", 250, 40, 9, 5, "bar", FoodGroup::Training),
    ("Oatmeal (1 cup cooked)", 150, 27, 6, 3, "cup", FoodGroup::Grains),
    ("White Rice (1 cup cooked)", 200, 45, 4, 0, "cup", FoodGroup::Grains),
    ("Pasta (1 cup cooked)", 220, 43, 8, 1, "cup", FoodGroup::Grains),
    ("Sweet Potato (Medium)", 112, 26, 2, 0, "potato", FoodGroup::Produce),
    ("Bagel (Whole)", 250, 50, 10, 1, "bagel", FoodGroup::Grains),
    ("Chicken Breast (100g)", 165, 0, 31, 3, "100g", FoodGroup::Protein),
    ("Egg (Large)", 70, 0, 6, 5, "egg", FoodGroup::Protein),
    ("Tuna (Can)", 120, 0, 26, 1, "can", FoodGroup::Protein),
    ("Greek Yogurt (1 cup)", 130, 9, 23, 0, "cup", FoodGroup::Protein),
    ("Protein Powder (Scoop)", 120, 3, 24, 1, "scoop", FoodGroup::Protein),
    ("Avocado (Half)", 160, 9, 2, 15, "half", FoodGroup::Fat),
    ("Peanut Butter (1 tbsp)", 95, 3, 4, 8, "tbsp", FoodGroup::Fat),
    ("Olive Oil (1 tbsp)", 120, 0, 0, 14, "tbsp", FoodGroup::Fat),
    ("Almonds (Handful)", 160, 6, 6, 14, "handful", FoodGroup::Fat),
];

/// Read-only list of known foods
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    items: Vec<CatalogItem>,
}

impl FoodCatalog {
    /// The curated list of cyclist staples
    pub fn builtin() -> Self {
        let items = BUILTIN_FOODS
            .iter()
            .map(|&(name, calories, carbs, protein, fat, unit, group)| {
                CatalogItem::new(name, calories, carbs, protein, fat, unit, group)
            })
            .collect();
        Self { items }
    }

    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// All items in catalog order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring match on name, in catalog order.
    /// A blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact, case-insensitive name lookup, folding case the same way as `search`
    pub fn find(&self, name: &str) -> Option<&CatalogItem> {
        let name = name.trim().to_lowercase();
        self.items
            .iter()
            .find(|item| item.name.to_lowercase() == name)
    }
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Raw text of the custom food form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomFoodForm {
    pub name: String,
    pub calories: String,
    pub carbs: String,
    pub protein: String,
    pub fat: String,
    pub serving_unit: String,
}

/// Validate a custom food form and turn it into a single-serving item.
///
/// Name and calories are required; the other macros fall back to 0 when blank
/// or unparseable.
pub fn build_custom_item(form: &CustomFoodForm) -> Result<CatalogItem, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let calories = form
        .calories
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidCalories(form.calories.clone()))?;

    let serving_unit = match form.serving_unit.trim() {
        "" => DEFAULT_SERVING_UNIT,
        unit => unit,
    };

    Ok(CatalogItem::new(
        name,
        calories,
        parse_macro_or_zero(&form.carbs),
        parse_macro_or_zero(&form.protein),
        parse_macro_or_zero(&form.fat),
        serving_unit,
        FoodGroup::Custom,
    ))
}

fn parse_macro_or_zero(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}
