//! Daily nutrition ledger
//!
//! - **types**: `MealSlot`, `FoodEntry`, `DailyLog`, `MacroTotals` and the
//!   pure `compute_totals` aggregation
//! - **store**: `LedgerStore`, the per-date log with write-through persistence
//!
//! Totals are never stored; they are recomputed from the entries on every read.
//!
//! # Example
//!
//! ```rust
//! use macrolog::catalog::FoodCatalog;
//! use macrolog::ledger::{compute_totals, LedgerStore, MealSlot};
//! use macrolog::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let catalog = FoodCatalog::builtin();
//! let mut ledger = LedgerStore::load(Arc::new(MemoryStore::new())).unwrap();
//! let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! let banana = catalog.find("Banana (Medium)").unwrap();
//! ledger.add_entry(date, MealSlot::Breakfast, banana, 1.0).unwrap();
//!
//! let totals = compute_totals(&ledger.daily_log(date));
//! assert_eq!(totals.calories, 105);
//! ```

pub mod store;
pub mod types;

pub use store::LedgerStore;
pub use types::{compute_totals, DailyLog, FoodEntry, LogStore, MacroTotals, MealSlot};
