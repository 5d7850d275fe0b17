//! # Field Selection
//!
//! `select=name,category` restricts returned documents to the listed fields.
//! The identifier field is always returned.

use std::collections::BTreeSet;

use serde_json::Value;

use super::errors::QueryResult;
use super::raw::RawQuery;

/// Identifier field present on every stored document
pub const ID_FIELD: &str = "_id";

/// Fields to return; empty means every field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: BTreeSet<String>,
}

impl Projection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: BTreeSet<String> = fields.into_iter().map(Into::into).collect();
        if !fields.is_empty() {
            fields.insert(ID_FIELD.to_string());
        }
        Self { fields }
    }

    pub fn is_all(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.is_all() || self.fields.contains(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Drop every field not selected. Non-object documents pass through.
    pub fn apply(&self, doc: Value) -> Value {
        if self.is_all() {
            return doc;
        }
        match doc {
            Value::Object(obj) => Value::Object(
                obj.into_iter()
                    .filter(|(k, _)| self.fields.contains(k))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Build the projection from the `select` key.
///
/// Fields may be separated by commas or spaces.
pub fn build_projection(raw: &RawQuery) -> QueryResult<Projection> {
    let Some(value) = raw.scalar("select")? else {
        return Ok(Projection::all());
    };

    Ok(Projection::of(
        value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty()),
    ))
}
