//! # In-Memory Collection
//!
//! Documents are JSON objects held behind a `RwLock`. Reads clone the
//! matching documents out of the lock before sorting.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::slug::slugify;
use super::Collection;
use crate::query::{ParsedFilter, Projection, SortSpec, ID_FIELD};
use crate::resource::Resource;

/// Fields a slug is derived from, in order of preference
const SLUG_SOURCES: [&str; 2] = ["title", "name"];

/// Counters every content document starts with
const COUNTERS: [&str; 2] = ["views", "likes"];

pub struct MemoryCollection {
    name: String,
    label: String,
    documents: RwLock<Vec<Value>>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            documents: RwLock::new(Vec::new()),
        }
    }

    pub fn for_resource(resource: Resource) -> Self {
        Self {
            name: resource.as_str().to_string(),
            label: resource.label().to_string(),
            documents: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Value>>> {
        self.documents
            .read()
            .map_err(|_| StoreError::LockPoisoned(self.name.clone()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Value>>> {
        self.documents
            .write()
            .map_err(|_| StoreError::LockPoisoned(self.name.clone()))
    }

    /// Insert a document, filling in `_id`, `slug`, timestamps and counters
    /// when they are absent. Returns the stored document.
    pub fn insert(&self, doc: Value) -> StoreResult<Value> {
        let Value::Object(mut obj) = doc else {
            return Err(StoreError::InvalidDocument(format!(
                "{} documents must be JSON objects",
                self.name
            )));
        };

        prepare_document(&mut obj);
        let doc = Value::Object(obj);

        self.write()?.push(doc.clone());
        Ok(doc)
    }

    pub fn insert_many(&self, docs: impl IntoIterator<Item = Value>) -> StoreResult<usize> {
        let mut inserted = 0;
        for doc in docs {
            self.insert(doc)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// First document whose `field` equals `value`
    pub fn find_one(&self, field: &str, value: &str) -> StoreResult<Value> {
        let docs = self.read()?;
        docs.iter()
            .find(|d| d.get(field).and_then(Value::as_str) == Some(value))
            .cloned()
            .ok_or_else(|| self.not_found(field, value))
    }

    /// Like [`find_one`](Self::find_one), but also bumps the view counter
    pub fn record_view(&self, field: &str, value: &str) -> StoreResult<Value> {
        let mut docs = self.write()?;
        let doc = docs
            .iter_mut()
            .find(|d| d.get(field).and_then(Value::as_str) == Some(value))
            .ok_or_else(|| self.not_found(field, value))?;

        let views = doc.get("views").and_then(Value::as_u64).unwrap_or(0);
        if let Some(obj) = doc.as_object_mut() {
            obj.insert("views".to_string(), Value::from(views + 1));
        }

        Ok(doc.clone())
    }

    /// Clients address documents by `id`, the stored key is `_id`
    fn not_found(&self, field: &str, value: &str) -> StoreError {
        let field = if field == ID_FIELD { "id" } else { field };
        StoreError::DocumentNotFound {
            collection: self.label.clone(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
