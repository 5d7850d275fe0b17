//! # Store Errors

use thiserror::Error;

/// Result type for document store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A reader or writer panicked while holding the collection lock
    #[error("Collection '{0}' lock poisoned")]
    LockPoisoned(String),

    /// No collection registered under this name
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Lookup by identifier or slug found nothing
    #[error("{collection} not found with {field} of {value}")]
    DocumentNotFound {
        collection: String,
        field: String,
        value: String,
    },

    /// Inserted value was not a JSON object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Seed file could not be read or decoded
    #[error("Seed error: {0}")]
    Seed(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::CollectionNotFound(_) | StoreError::DocumentNotFound { .. }
        )
    }
}
