//! Content nodes and their identities.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::store::value::{PropertyValue, Value};

/// Stable identity of a node, valid for the lifetime of the tree and usable
/// as a reference target from anywhere in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a raw identity.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identity value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The type tag of a content node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    /// An authored questionnaire definition
    Questionnaire,
    /// A (possibly conditionally visible) grouping of questions
    Section,
    /// A single question definition
    Question,
    /// Boolean combinator over child conditions
    ConditionalGroup,
    /// A single comparator with two operands
    Conditional,
    /// Operand of a condition
    Operand,
    /// An instance of answers to a questionnaire
    Form,
    /// Instance of a section inside a form
    AnswerSection,
    /// Typed value(s) answering one question
    Answer,
    /// A hierarchical real-world entity (site, patient, visit)
    Subject,
    /// A label in the subject-type hierarchy
    SubjectType,
    /// Any other node type; carried through untouched
    Other(String),
}

/// A generic typed tree node.
///
/// Nodes hold a type tag, a map of typed properties, and ordered children by
/// name. Child order is insertion order; condition groups rely on it for
/// deterministic left-to-right evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    id: NodeId,
    node_type: NodeType,
    parent: Option<NodeId>,
    properties: FxHashMap<String, PropertyValue>,
    children: Vec<(String, NodeId)>,
}

impl ContentNode {
    pub(crate) fn new(id: NodeId, node_type: NodeType, parent: Option<NodeId>) -> Self {
        Self {
            id,
            node_type,
            parent,
            properties: FxHashMap::default(),
            children: Vec::new(),
        }
    }

    /// This node's identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// This node's type tag.
    #[must_use]
    pub const fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Identity of the parent node, if this is not a root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub(crate) fn put_property(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    pub(crate) fn remove_property(&mut self, name: &str) {
        self.properties.remove(name);
    }

    pub(crate) fn push_child(&mut self, name: impl Into<String>, id: NodeId) {
        self.children.push((name.into(), id));
    }

    /// The string content of a single-valued string property.
    #[must_use]
    pub fn string_property(&self, name: &str) -> Option<&str> {
        self.property(name)?.first()?.as_str()
    }

    /// The value of a boolean property, if present and boolean-typed.
    #[must_use]
    pub fn bool_property(&self, name: &str) -> Option<bool> {
        match self.property(name)?.first()? {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The first referenced identity of a reference property.
    ///
    /// Multi-valued reference properties treat the first value as
    /// authoritative.
    #[must_use]
    pub fn reference(&self, name: &str) -> Option<NodeId> {
        self.property(name)?.first()?.as_reference()
    }

    /// All referenced identities of a reference property, in order.
    /// Non-reference values are skipped. Missing property yields an empty list.
    #[must_use]
    pub fn references(&self, name: &str) -> Vec<NodeId> {
        self.property(name)
            .map(|prop| prop.values().iter().filter_map(Value::as_reference).collect())
            .unwrap_or_default()
    }

    /// Identity of the child with the given name, if any.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .map(|&(_, id)| id)
    }

    /// Names of all children, in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(name, _)| name.as_str())
    }

    /// Identities of all children, in insertion order.
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map(|&(_, id)| id)
    }

    /// All property names and values on this node.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }
}
