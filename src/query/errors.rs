//! # Query Errors
//!
//! Every failure in this module means the client sent a query that cannot be
//! interpreted. None of them are retryable.

use thiserror::Error;

/// Result type for query parsing
pub type QueryResult<T> = Result<T, QueryError>;

/// Invalid query errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Bracket notation could not be decoded (`a[b`, `a]`, `[a]`)
    #[error("Malformed query key: {0}")]
    MalformedKey(String),

    /// The same key was used both as a value and as a nested mapping
    #[error("Conflicting values for query key: {0}")]
    ConflictingKey(String),

    /// Raw querystring could not be URL-decoded
    #[error("Malformed querystring: {0}")]
    MalformedQueryString(String),

    /// Operator token outside the allow-list
    #[error("Unknown operator '{operator}' on field '{field}'")]
    UnknownOperator { field: String, operator: String },

    /// Value has the wrong shape for the key it is attached to
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl QueryError {
    pub(crate) fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        QueryError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
