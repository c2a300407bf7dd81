//! Domain error types
//!
//! Validation failures abort an operation before any state changes. Storage
//! failures happen after the in-memory state was updated and are left to the
//! host to log or escalate.

use crate::storage::StorageError;
use thiserror::Error;

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Custom food without a name
    #[error("Food name is required")]
    MissingName,

    /// Custom food without calories, or calories not a non-negative integer
    #[error("Calories must be a non-negative whole number, got '{0}'")]
    InvalidCalories(String),

    /// Serving multiplier that is not a positive finite number, or so large
    /// that a scaled value overflows
    #[error("Serving multiplier must be a positive number within range, got {0}")]
    InvalidMultiplier(f64),

    /// Goal value outside its allowed range
    #[error("{field} goal must be between {min} and {max}, got {value}")]
    GoalOutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Date not in YYYY-MM-DD form
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Unknown meal slot name
    #[error("Unknown meal '{0}': expected breakfast, training, lunch, dinner or snacks")]
    UnknownMealSlot(String),
}

/// Errors surfaced by the ledger and goal stores
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A stored entry already holds the largest possible id
    #[error("No entry ids left above {0}")]
    IdsExhausted(u64),
}

/// Result type alias for store operations
pub type LedgerResult<T> = Result<T, LedgerError>;
