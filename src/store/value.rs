//! Typed property values.
//!
//! Every property stored on a content node is either a single [`Value`] or
//! an ordered list of them. The six user-facing types (string, long, double,
//! decimal, boolean, date-time) are the ones condition comparators operate
//! on; [`Value::Reference`] carries node identities for reference properties
//! and never reaches a comparator.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::node::NodeId;

/// A single typed property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Free-text value
    String(String),
    /// Integer value
    Long(i64),
    /// Floating-point value
    Double(f64),
    /// Fixed-point decimal value, compared by exact value
    Decimal(Decimal),
    /// Boolean value
    Boolean(bool),
    /// Date-time instant with a fixed offset
    DateTime(DateTime<FixedOffset>),
    /// Identity of another node in the tree
    Reference(NodeId),
}

/// The type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// Free-text
    String,
    /// Integer
    Long,
    /// Floating-point
    Double,
    /// Fixed-point decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Date-time instant
    DateTime,
    /// Node identity
    Reference,
}

impl Value {
    /// The type tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Long(_) => ValueKind::Long,
            Self::Double(_) => ValueKind::Double,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::DateTime(_) => ValueKind::DateTime,
            Self::Reference(_) => ValueKind::Reference,
        }
    }

    /// The string content, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The referenced node identity, if this is a reference value.
    #[must_use]
    pub const fn as_reference(&self) -> Option<NodeId> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Self::Reference(id)
    }
}

/// A property slot on a content node: one value or an ordered list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Single-valued property
    Scalar(Value),
    /// Multi-valued property; order is preserved
    Multi(Vec<Value>),
}

impl PropertyValue {
    /// All values of this property, in order. A scalar yields one value.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// The first value, if any. For multi-valued reference properties the
    /// first value is the authoritative one.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.values().first()
    }

    /// Number of values held by this property.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// Whether this property holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

impl From<Value> for PropertyValue {
    fn from(value: Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Value>> for PropertyValue {
    fn from(values: Vec<Value>) -> Self {
        Self::Multi(values)
    }
}
