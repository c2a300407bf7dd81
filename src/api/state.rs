//! Application State
//!
//! Shared state accessible by all API handlers.
//! Each store sits behind its own async mutex, so a mutation always runs to
//! completion before the next one on the same store begins.

use crate::catalog::FoodCatalog;
use crate::config::ApiConfig;
use crate::date::{DateSource, SystemDate};
use crate::goals::GoalStore;
use crate::ledger::LedgerStore;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Shared application state for all handlers
pub struct AppState {
    /// Per-date food logs
    pub ledger: Mutex<LedgerStore>,
    /// Daily targets
    pub goals: Mutex<GoalStore>,
    /// Built-in foods
    pub catalog: FoodCatalog,
    /// Resolves `today` in paths
    pub date_source: Arc<dyn DateSource>,
    /// API configuration
    pub config: ApiConfig,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the built-in catalog and the system clock
    pub fn new(ledger: LedgerStore, goals: GoalStore, config: ApiConfig) -> Self {
        Self::with_date_source(ledger, goals, config, Arc::new(SystemDate::default()))
    }

    /// Create AppState with a custom source for "today"
    pub fn with_date_source(
        ledger: LedgerStore,
        goals: GoalStore,
        config: ApiConfig,
        date_source: Arc<dyn DateSource>,
    ) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            goals: Mutex::new(goals),
            catalog: FoodCatalog::builtin(),
            date_source,
            config,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
