//! # Sort Specification
//!
//! `sort=-createdAt,title` sorts by `createdAt` descending, then `title`
//! ascending. Without a `sort` key, newest documents come first.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use super::compare::compare_values;
use super::errors::QueryResult;
use super::raw::RawQuery;

/// Field every collection is sorted by when the client does not ask otherwise
pub const DEFAULT_SORT_FIELD: &str = "createdAt";

/// Prefix that flips a sort key to descending
pub const DESCENDING_MARKER: char = '-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Ordered sort keys; the first key is the primary one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            keys: vec![SortKey::desc(DEFAULT_SORT_FIELD)],
        }
    }
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Compare two documents key by key
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        for key in &self.keys {
            let ordering = compare_values(a.get(&key.field), b.get(&key.field));
            let ordering = match key.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort
    pub fn sort(&self, documents: &mut [Value]) {
        documents.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if key.direction == SortDirection::Desc {
                write!(f, "{}", DESCENDING_MARKER)?;
            }
            f.write_str(&key.field)?;
        }
        Ok(())
    }
}

/// Build the sort specification from the `sort` key
pub fn build_sort(raw: &RawQuery) -> QueryResult<SortSpec> {
    let Some(value) = raw.scalar("sort")? else {
        return Ok(SortSpec::default());
    };

    let keys: Vec<SortKey> = value
        .split(',')
        .map(str::trim)
        .filter_map(|token| match token.strip_prefix(DESCENDING_MARKER) {
            Some(field) if !field.is_empty() => Some(SortKey::desc(field)),
            Some(_) => None,
            None if !token.is_empty() => Some(SortKey::asc(token)),
            None => None,
        })
        .collect();

    if keys.is_empty() {
        return Ok(SortSpec::default());
    }

    Ok(SortSpec::new(keys))
}
