//! # Value Comparison
//!
//! Ordering rules shared by filtering and sorting.
//!
//! Querystring literals are untyped, so a literal is cast to the type of the
//! document field it is compared against: numeric fields compare
//! numerically, boolean fields accept `true`/`false`, string fields compare
//! lexically. A literal that cannot be cast does not compare at all.

use std::cmp::Ordering;

use serde_json::Value;

/// Compare a document field against a querystring literal.
///
/// Returns `None` when the literal cannot be cast to the field's type, or
/// the field is an array or object.
pub fn compare_literal(field: &Value, literal: &str) -> Option<Ordering> {
    match field {
        Value::Number(n) => {
            let lhs = n.as_f64()?;
            let rhs = literal.trim().parse::<f64>().ok()?;
            lhs.partial_cmp(&rhs)
        }
        Value::String(s) => Some(s.as_str().cmp(literal)),
        Value::Bool(b) => match literal {
            "true" => Some(b.cmp(&true)),
            "false" => Some(b.cmp(&false)),
            _ => None,
        },
        Value::Null => (literal == "null").then_some(Ordering::Equal),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Equality after casting the literal to the field's type
pub fn equals_literal(field: &Value, literal: &str) -> bool {
    compare_literal(field, literal) == Some(Ordering::Equal)
}

/// Total order over optional document values, used for sorting.
///
/// Follows MongoDB's BSON comparison order so sorted pages come out the
/// way the document store would return them:
/// - missing = null < number < string < object < array < bool
/// - same types use their natural ordering; arrays and objects tie
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    let by_type = type_rank(a).cmp(&type_rank(b));
    if by_type != Ordering::Equal {
        return by_type;
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Number(_) => 1,
        Value::String(_) => 2,
        Value::Object(_) => 3,
        Value::Array(_) => 4,
        Value::Bool(_) => 5,
    }
}
