//! # Raw Query Decoding
//!
//! Decodes a querystring into a string-keyed tree, expanding bracket
//! notation the way Express' `qs` does for the shapes this API accepts:
//!
//! - `category=Focus` → scalar
//! - `tags=a&tags=b`, `tags[]=a&tags[]=b` → list
//! - `rating[gte]=4` → nested mapping

use std::collections::btree_map::{self, BTreeMap};

use super::errors::{QueryError, QueryResult};

/// One decoded querystring value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, RawValue>),
}

impl RawValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        RawValue::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        RawValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RawValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the shape, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Scalar(_) => "value",
            RawValue::List(_) => "list",
            RawValue::Map(_) => "mapping",
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::scalar(value)
    }
}

/// Decoded querystring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    entries: BTreeMap<String, RawValue>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any previous value for `key`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Decode a URL-encoded querystring (without the leading `?`)
    pub fn parse(query: &str) -> QueryResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| QueryError::MalformedQueryString(e.to_string()))?;
        Self::from_pairs(pairs)
    }

    /// Build from already-decoded key/value pairs, in arrival order
    pub fn from_pairs<I, K, V>(pairs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = RawQuery::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let segments = split_key(key)?;
            insert_at(&mut query.entries, key, &segments, value.into())?;
        }
        Ok(query)
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// Single-valued lookup; lists and mappings are rejected
    pub fn scalar(&self, key: &str) -> QueryResult<Option<&str>> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(RawValue::Scalar(s)) => Ok(Some(s)),
            Some(other) => Err(QueryError::invalid_value(
                key,
                format!("expected a single value, got a {}", other.kind()),
            )),
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, RawValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RawQuery {
    type Item = (&'a String, &'a RawValue);
    type IntoIter = btree_map::Iter<'a, String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`
fn split_key(key: &str) -> QueryResult<Vec<&str>> {
    let malformed = || QueryError::MalformedKey(key.to_string());

    let Some(open) = key.find('[') else {
        if key.is_empty() || key.contains(']') {
            return Err(malformed());
        }
        return Ok(vec![key]);
    };

    let base = &key[..open];
    if base.is_empty() || base.contains(']') {
        return Err(malformed());
    }

    let mut segments = vec![base];
    let mut rest = &key[open..];
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        let segment = &inner[..close];
        if segment.contains('[') {
            return Err(malformed());
        }
        segments.push(segment);
        rest = &inner[close + 1..];
    }

    Ok(segments)
}

fn insert_at(
    entries: &mut BTreeMap<String, RawValue>,
    full_key: &str,
    segments: &[&str],
    value: String,
) -> QueryResult<()> {
    let [head, rest @ ..] = segments else {
        return Err(QueryError::MalformedKey(full_key.to_string()));
    };

    match rest {
        [] => append(entries, full_key, head, value, false),
        [""] => append(entries, full_key, head, value, true),
        [first, ..] if first.is_empty() => Err(QueryError::MalformedKey(full_key.to_string())),
        _ => {
            let slot = entries
                .entry(head.to_string())
                .or_insert_with(|| RawValue::Map(BTreeMap::new()));
            match slot {
                RawValue::Map(inner) => insert_at(inner, full_key, rest, value),
                _ => Err(QueryError::ConflictingKey(full_key.to_string())),
            }
        }
    }
}

/// Store a leaf value; a repeated key turns a scalar into a list
fn append(
    entries: &mut BTreeMap<String, RawValue>,
    full_key: &str,
    key: &str,
    value: String,
    as_list: bool,
) -> QueryResult<()> {
    let leaf = match entries.remove(key) {
        None if as_list => RawValue::List(vec![value]),
        None => RawValue::Scalar(value),
        Some(RawValue::Scalar(previous)) => RawValue::List(vec![previous, value]),
        Some(RawValue::List(mut items)) => {
            items.push(value);
            RawValue::List(items)
        }
        Some(RawValue::Map(_)) => {
            return Err(QueryError::ConflictingKey(full_key.to_string()));
        }
    };
    entries.insert(key.to_string(), leaf);
    Ok(())
}
