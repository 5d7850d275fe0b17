//! # Document Store
//!
//! The list-query pipeline reads documents through the [`Collection`]
//! trait only, so any engine that can count and fetch by a
//! [`ParsedFilter`] can back it. [`MemoryCollection`] is the engine the
//! server ships with.

pub mod catalog;
pub mod errors;
pub mod memory;
pub mod slug;

pub use catalog::Catalog;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryCollection;
pub use slug::slugify;

use serde_json::Value;

use crate::query::{ParsedFilter, Projection, SortSpec};

/// Read access to one document collection
pub trait Collection: Send + Sync {
    /// Collection name
    fn name(&self) -> &str;

    /// Number of documents matching `filter`, ignoring any window
    fn count(&self, filter: &ParsedFilter) -> StoreResult<u64>;

    /// Matching documents, sorted, windowed, then projected
    fn find(
        &self,
        filter: &ParsedFilter,
        sort: &SortSpec,
        projection: &Projection,
        skip: u64,
        limit: u64,
    ) -> StoreResult<Vec<Value>>;
}
