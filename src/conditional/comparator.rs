//! Scalar comparators over typed values.
//!
//! Comparison dispatches on the type of operand A; the other side is coerced
//! to that type. An unsupported pairing or a failed coercion makes the
//! comparator return `false` — evaluation never raises past this module.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::conditional::date;
use crate::store::Value;

/// The comparator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `=`
    Eq,
    /// `<>`
    Neq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `is empty`
    IsEmpty,
    /// `is not empty`
    IsNotEmpty,
}

impl Comparator {
    /// Parse the stored comparator text.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "=" => Some(Self::Eq),
            "<>" => Some(Self::Neq),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "is empty" => Some(Self::IsEmpty),
            "is not empty" => Some(Self::IsNotEmpty),
            _ => None,
        }
    }

    /// Whether this comparator tests presence instead of comparing values.
    /// Presence comparators ignore the operand quantifier flags.
    #[must_use]
    pub const fn is_presence(self) -> bool {
        matches!(self, Self::IsEmpty | Self::IsNotEmpty)
    }
}

/// Evaluate `a <comparator> b` on one pair of scalar values.
pub(crate) fn compare(comparator: Comparator, a: &Value, b: &Value) -> bool {
    match comparator {
        Comparator::Eq => equals(a, b),
        Comparator::Neq => !equals(a, b),
        Comparator::Lt => ordering(a, b) == Some(Ordering::Less),
        Comparator::Gt => ordering(a, b) == Some(Ordering::Greater),
        // Presence is decided from operand lengths before scalar comparison.
        Comparator::IsEmpty | Comparator::IsNotEmpty => false,
    }
}

fn equals(a: &Value, b: &Value) -> bool {
    match a {
        Value::String(va) => b.as_str() == Some(va.as_str()),
        Value::Long(va) => to_long(b) == Some(*va),
        Value::Double(va) => to_double(b).is_some_and(|vb| *va == vb),
        Value::Decimal(va) => to_decimal(b).is_some_and(|vb| *va == vb),
        Value::Boolean(va) => to_boolean(b) == Some(*va),
        Value::DateTime(va) => to_date(b).is_some_and(|vb| *va == vb),
        Value::Reference(_) => false,
    }
}

fn ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match a {
        Value::Long(va) => to_long(b).map(|vb| va.cmp(&vb)),
        Value::Double(va) => to_double(b).and_then(|vb| va.partial_cmp(&vb)),
        Value::Decimal(va) => to_decimal(b).map(|vb| va.cmp(&vb)),
        Value::DateTime(va) => to_date(b).map(|vb| va.cmp(&vb)),
        // Ordering is not defined for strings, booleans or references
        Value::String(_) | Value::Boolean(_) | Value::Reference(_) => None,
    }
}

fn to_long(value: &Value) -> Option<i64> {
    match value {
        Value::Long(n) => Some(*n),
        Value::Double(d) => Some(*d as i64),
        Value::Decimal(d) => d.to_i64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Boolean(_) | Value::DateTime(_) | Value::Reference(_) => None,
    }
}

fn to_double(value: &Value) -> Option<f64> {
    match value {
        Value::Long(n) => Some(*n as f64),
        Value::Double(d) => Some(*d),
        Value::Decimal(d) => d.to_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Boolean(_) | Value::DateTime(_) | Value::Reference(_) => None,
    }
}

fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Long(n) => Some(Decimal::from(*n)),
        Value::Double(d) => Decimal::from_f64(*d),
        Value::Decimal(d) => Some(*d),
        Value::String(s) => s.trim().parse().ok(),
        Value::Boolean(_) | Value::DateTime(_) | Value::Reference(_) => None,
    }
}

fn to_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_date(value: &Value) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => date::parse_instant(s),
        _ => None,
    }
}
