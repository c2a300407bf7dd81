//! # Macrolog
//!
//! Daily nutrition ledger for cyclists: log foods per meal per day and track
//! calorie and macro totals against daily goals.
//!
//! ## Modules
//!
//! - [`ledger`]: Per-date food logs and the daily totals aggregation
//! - [`goals`]: Daily targets, with preview drafts and committed saves
//! - [`progress`]: Progress percentages against goals
//! - [`catalog`]: Built-in foods and custom food validation
//! - [`storage`]: Key-value persistence of the two JSON blobs
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use macrolog::catalog::FoodCatalog;
//! use macrolog::goals::GoalStore;
//! use macrolog::ledger::{LedgerStore, MealSlot};
//! use macrolog::progress::DayProgress;
//! use macrolog::storage::{FileStore, KeyValueStore};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let medium: Arc<dyn KeyValueStore> = Arc::new(FileStore::new("./macrolog_data"));
//!     let mut ledger = LedgerStore::load(Arc::clone(&medium))?;
//!     let goals = GoalStore::load(medium)?;
//!
//!     let catalog = FoodCatalog::builtin();
//!     let today = chrono::Local::now().date_naive();
//!
//!     // Two gels on the bike
//!     let gel = catalog.find("Energy Gel (Generic)").ok_or("missing gel")?;
//!     ledger.add_entry(today, MealSlot::Training, gel, 2.0)?;
//!
//!     let progress = DayProgress::new(&ledger.daily_log(today), &goals.goals());
//!     println!("{} / {} kcal", progress.totals.calories, progress.goals.calories);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod confirm;
pub mod date;
pub mod error;
pub mod export;
pub mod goals;
pub mod ledger;
pub mod logging;
pub mod progress;
pub mod storage;

// Re-export top-level types for convenience
pub use catalog::{build_custom_item, CatalogItem, CustomFoodForm, FoodCatalog, FoodGroup};

pub use error::{LedgerError, LedgerResult, ValidationError};

pub use goals::{GoalDraft, GoalStore, GoalUpdate, Goals};

pub use ledger::{compute_totals, DailyLog, FoodEntry, LedgerStore, LogStore, MacroTotals, MealSlot};

pub use progress::{progress_percent, DayProgress, MacroProgress};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
