//! # Filter Translation
//!
//! Turns the non-reserved keys of a [`RawQuery`] into typed predicates.
//!
//! `rating[gte]=4` becomes `Condition::Gte("4")` on `rating`. Only the
//! operators `gt`, `gte`, `lt`, `lte` and `in` are accepted; anything else
//! is rejected rather than forwarded to the store.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::compare::{compare_literal, equals_literal};
use super::errors::{QueryError, QueryResult};
use super::raw::{RawQuery, RawValue};

/// Keys that configure the pipeline instead of filtering documents
pub const RESERVED_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Marker the document store uses in front of operator names
pub const OPERATOR_MARKER: char = '$';

/// One comparison against a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Gt(String),
    Gte(String),
    Lt(String),
    Lte(String),
    In(Vec<String>),
}

impl Condition {
    /// Build a condition from an operator token and its raw value
    fn parse(field: &str, operator: &str, value: &RawValue) -> QueryResult<Self> {
        let single = || -> QueryResult<String> {
            value.as_scalar().map(str::to_string).ok_or_else(|| {
                QueryError::invalid_value(
                    format!("{}[{}]", field, operator),
                    format!("expected a single value, got a {}", value.kind()),
                )
            })
        };

        match operator {
            "gt" => Ok(Condition::Gt(single()?)),
            "gte" => Ok(Condition::Gte(single()?)),
            "lt" => Ok(Condition::Lt(single()?)),
            "lte" => Ok(Condition::Lte(single()?)),
            "in" => match value {
                RawValue::Scalar(s) => Ok(Condition::In(split_list(s))),
                RawValue::List(items) => Ok(Condition::In(items.clone())),
                RawValue::Map(_) => Err(QueryError::invalid_value(
                    format!("{}[in]", field),
                    "expected a list of values",
                )),
            },
            _ => Err(QueryError::UnknownOperator {
                field: field.to_string(),
                operator: operator.to_string(),
            }),
        }
    }

    /// Operator token as it appears in the querystring
    pub fn token(&self) -> &'static str {
        match self {
            Condition::Gt(_) => "gt",
            Condition::Gte(_) => "gte",
            Condition::Lt(_) => "lt",
            Condition::Lte(_) => "lte",
            Condition::In(_) => "in",
        }
    }

    /// Store-side operator name (`$gte`, ...)
    pub fn operator(&self) -> String {
        format!("{}{}", OPERATOR_MARKER, self.token())
    }

    /// Check a single (non-array) field value
    fn matches_value(&self, field: &Value) -> bool {
        use std::cmp::Ordering::*;

        match self {
            Condition::Gt(lit) => compare_literal(field, lit) == Some(Greater),
            Condition::Gte(lit) => matches!(compare_literal(field, lit), Some(Greater | Equal)),
            Condition::Lt(lit) => compare_literal(field, lit) == Some(Less),
            Condition::Lte(lit) => matches!(compare_literal(field, lit), Some(Less | Equal)),
            Condition::In(lits) => lits.iter().any(|lit| equals_literal(field, lit)),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Condition::Gt(v) | Condition::Gte(v) | Condition::Lt(v) | Condition::Lte(v) => {
                Value::String(v.clone())
            }
            Condition::In(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Predicate attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `field=value`
    Equals(String),
    /// `field[op]=value`, all conditions must hold
    Conditions(Vec<Condition>),
}

impl Predicate {
    /// Check a document field. Missing fields never match.
    ///
    /// Array fields match when any element satisfies each condition.
    pub fn matches(&self, field: Option<&Value>) -> bool {
        let Some(field) = field else {
            return false;
        };

        match self {
            Predicate::Equals(lit) => any_element(field, |v| equals_literal(v, lit)),
            Predicate::Conditions(conditions) => conditions
                .iter()
                .all(|c| any_element(field, |v| c.matches_value(v))),
        }
    }
}

fn any_element(field: &Value, check: impl Fn(&Value) -> bool) -> bool {
    match field {
        Value::Array(items) => items.iter().any(check),
        other => check(other),
    }
}

/// Field predicates, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFilter {
    predicates: BTreeMap<String, Predicate>,
}

impl ParsedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.predicates
            .insert(field.into(), Predicate::Equals(value.into()));
        self
    }

    pub fn condition(mut self, field: impl Into<String>, condition: Condition) -> Self {
        let field = field.into();
        match self.predicates.get_mut(&field) {
            Some(Predicate::Conditions(conditions)) => conditions.push(condition),
            _ => {
                self.predicates
                    .insert(field, Predicate::Conditions(vec![condition]));
            }
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.predicates.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Predicate)> {
        self.predicates.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Check whether a document satisfies every predicate
    pub fn matches(&self, doc: &Value) -> bool {
        self.predicates
            .iter()
            .all(|(field, predicate)| predicate.matches(doc.get(field)))
    }

    /// Render as a document-store filter, e.g. `{"rating": {"$gte": "4"}}`
    pub fn to_document(&self) -> Value {
        let mut filter = Map::new();
        for (field, predicate) in &self.predicates {
            let rendered = match predicate {
                Predicate::Equals(v) => Value::String(v.clone()),
                Predicate::Conditions(conditions) => Value::Object(
                    conditions
                        .iter()
                        .map(|c| (c.operator(), c.to_value()))
                        .collect(),
                ),
            };
            filter.insert(field.clone(), rendered);
        }
        Value::Object(filter)
    }
}

/// Translate the filter keys of a raw query into predicates
pub fn build_filter(raw: &RawQuery) -> QueryResult<ParsedFilter> {
    let mut filter = ParsedFilter::new();

    for (field, value) in raw {
        if RESERVED_KEYS.contains(&field.as_str()) {
            continue;
        }

        filter = match value {
            RawValue::Scalar(v) => filter.equals(field.as_str(), v.as_str()),
            RawValue::List(values) => {
                filter.condition(field.as_str(), Condition::In(values.clone()))
            }
            RawValue::Map(operators) => {
                let mut filter = filter;
                for (operator, operand) in operators {
                    if matches!(operand, RawValue::Map(_)) {
                        return Err(QueryError::invalid_value(
                            format!("{}[{}]", field, operator),
                            "filters nest at most one level",
                        ));
                    }
                    let condition = Condition::parse(field, operator, operand)?;
                    filter = filter.condition(field.as_str(), condition);
                }
                filter
            }
        };
    }

    Ok(filter)
}

/// Split a comma-separated `in` list, dropping empty entries
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
