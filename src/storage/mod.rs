//! Macrolog Storage
//!
//! Durable local storage for the two persisted blobs:
//!
//! - **kv**: `KeyValueStore` trait with file-backed and in-memory media
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/cyclistMacroLogs.json   → { "<date>": { "<slot>": [FoodEntry, ...] } }
//! <data_dir>/cyclistMacroGoals.json  → { calories, carbs, protein, fat }
//! ```
//!
//! Both blobs are read once at startup and rewritten wholesale after every
//! mutation of their store.

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{load_json, save_json, FileStore, KeyValueStore, MemoryStore, GOALS_KEY, LOGS_KEY};
