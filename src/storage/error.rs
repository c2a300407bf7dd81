//! Storage error types
//!
//! Defines all errors that can occur while reading or writing persisted blobs.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error for key '{key}': {message}")]
    Serialization { key: String, message: String },

    /// Lock acquisition failed (poisoned in-memory store)
    #[error("Lock error: {0}")]
    Lock(String),
}

impl StorageError {
    pub(crate) fn serialization(key: &str, err: serde_json::Error) -> Self {
        StorageError::Serialization {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = StorageError::serialization("cyclistMacroGoals", json_err);
        assert!(err
            .to_string()
            .starts_with("Serialization error for key 'cyclistMacroGoals'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let storage_err: StorageError = io_err.into();
        assert!(matches!(storage_err, StorageError::Io(_)));
    }
}
