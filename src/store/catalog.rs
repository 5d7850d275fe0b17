//! # Catalog
//!
//! One [`MemoryCollection`] per [`Resource`], optionally seeded from a JSON
//! file of the form `{ "tools": [ {...}, ... ], "tutorials": [...] }`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::errors::{StoreError, StoreResult};
use super::memory::MemoryCollection;
use crate::resource::Resource;

pub struct Catalog {
    collections: HashMap<Resource, Arc<MemoryCollection>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Empty collection for every resource
    pub fn new() -> Self {
        let collections = Resource::ALL
            .into_iter()
            .map(|r| (r, Arc::new(MemoryCollection::for_resource(r))))
            .collect();
        Self { collections }
    }

    pub fn collection(&self, resource: Resource) -> StoreResult<Arc<MemoryCollection>> {
        self.collections
            .get(&resource)
            .cloned()
            .ok_or_else(|| StoreError::CollectionNotFound(resource.to_string()))
    }

    /// Load documents from a seed file
    pub fn load_seed(&self, path: &Path) -> StoreResult<usize> {
        let content = fs::read_to_string(path).map_err(|e| {
            StoreError::Seed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let seed: Value = serde_json::from_str(&content)
            .map_err(|e| StoreError::Seed(format!("Invalid seed JSON: {}", e)))?;

        let inserted = self.seed(seed)?;
        info!(path = %path.display(), documents = inserted, "seed loaded");
        Ok(inserted)
    }

    /// Insert every document of a seed object, keyed by collection name
    pub fn seed(&self, seed: Value) -> StoreResult<usize> {
        let Value::Object(entries) = seed else {
            return Err(StoreError::Seed(
                "seed must be an object keyed by collection".to_string(),
            ));
        };

        let mut inserted = 0;
        for (name, docs) in entries {
            let resource: Resource = name.parse().map_err(StoreError::Seed)?;
            let Value::Array(docs) = docs else {
                return Err(StoreError::Seed(format!(
                    "'{}' must be an array of documents",
                    name
                )));
            };
            inserted += self.collection(resource)?.insert_many(docs)?;
        }
        Ok(inserted)
    }
}
