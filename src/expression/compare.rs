//! Comparison semantics.

use crate::feature::Value;
use crate::filter::{ComparisonOperator, Literal};
use geo_types::Geometry;
use std::cmp::Ordering;

/// A non-null operand resolved for comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Integer(i64),
    Float(f64),
    Text(&'a str),
    Geometry(&'a Geometry<f64>),
}

impl<'a> Scalar<'a> {
    /// View a value as a scalar; NULL has no scalar form
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Integer(i) => Some(Scalar::Integer(*i)),
            Value::Float(f) => Some(Scalar::Float(*f)),
            Value::Text(s) => Some(Scalar::Text(s)),
            Value::Geometry(g) => Some(Scalar::Geometry(g)),
        }
    }

    pub fn from_literal(literal: &'a Literal) -> Self {
        match literal {
            Literal::Integer(i) => Scalar::Integer(*i),
            Literal::Float(f) => Scalar::Float(*f),
            Literal::Text(s) => Scalar::Text(s),
        }
    }
}

/// Apply a comparison operator.
///
/// Numerics compare by numeric value (integers exactly, mixed via f64).
/// Text and geometries support only `=` and `<>`. Mismatched types and
/// unordered values (NaN) yield `false` for every operator.
pub fn compare(left: Scalar<'_>, op: ComparisonOperator, right: Scalar<'_>) -> bool {
    let ordering = match (left, right) {
        (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(&b)),
        (Scalar::Integer(a), Scalar::Float(b)) => (a as f64).partial_cmp(&b),
        (Scalar::Float(a), Scalar::Integer(b)) => a.partial_cmp(&(b as f64)),
        (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(&b),
        (Scalar::Text(a), Scalar::Text(b)) => return equality(a == b, op),
        (Scalar::Geometry(a), Scalar::Geometry(b)) => return equality(a == b, op),
        _ => None,
    };

    match ordering {
        Some(ordering) => apply(ordering, op),
        None => false,
    }
}

/// Equality-only types: relational operators are undefined and yield false
fn equality(equal: bool, op: ComparisonOperator) -> bool {
    if op.is_relational() {
        return false;
    }
    match op {
        ComparisonOperator::NotEqual => !equal,
        _ => equal,
    }
}

fn apply(ordering: Ordering, op: ComparisonOperator) -> bool {
    match op {
        ComparisonOperator::Equal => ordering == Ordering::Equal,
        ComparisonOperator::NotEqual => ordering != Ordering::Equal,
        ComparisonOperator::Less => ordering == Ordering::Less,
        ComparisonOperator::LessEqual => ordering != Ordering::Greater,
        ComparisonOperator::Greater => ordering == Ordering::Greater,
        ComparisonOperator::GreaterEqual => ordering != Ordering::Less,
    }
}
