//! Macrolog API Server
//!
//! Run with: cargo run --bin macrolog-api
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see `macrolog config`), then
//! applies environment overrides:
//! - `MACROLOG_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `MACROLOG_API_PORT`: Port to listen on (default: 8083)
//! - `MACROLOG_DATA_DIR`: Data directory
//! - `MACROLOG_DAY_BOUNDARY`: `local` or `utc`
//! - `RUST_LOG`: Log filter (default: macrolog=info)

use anyhow::Context;
use macrolog::api::{serve, AppState};
use macrolog::config::Config;
use macrolog::date::SystemDate;
use macrolog::goals::GoalStore;
use macrolog::ledger::LedgerStore;
use macrolog::storage::{FileStore, KeyValueStore};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    macrolog::logging::init(&config.logging);

    tracing::info!("Starting Macrolog API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.storage.data_path());

    let medium: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage.data_path()));
    let ledger = LedgerStore::load(Arc::clone(&medium)).context("Failed to load food logs")?;
    let goals = GoalStore::load(medium).context("Failed to load goals")?;

    let state = AppState::with_date_source(
        ledger,
        goals,
        config.api.clone(),
        Arc::new(SystemDate::new(config.ledger.day_boundary)),
    );

    serve(state, &config.api).await?;

    tracing::info!("Macrolog API server stopped");
    Ok(())
}
