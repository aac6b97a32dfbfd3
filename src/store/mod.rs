//! The content store: typed tree nodes and the access contract the commit
//! pipeline consumes.
//!
//! The pipeline never talks to persistence directly; it sees the tree through
//! the [`ContentSource`] trait, whose operations are synchronous and scoped to
//! the transaction of the commit being processed. [`ContentTree`] is the
//! in-memory implementation used by tests and by callers that stage a
//! mutation batch before committing it.

pub mod node;
pub mod value;

pub use node::{ContentNode, NodeId, NodeType};
pub use value::{PropertyValue, Value, ValueKind};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Abstract, transaction-scoped access to the content tree.
///
/// A resolution miss is `Ok(None)`; `Err` means the store itself failed and
/// is treated very differently by the pipeline (fail-open for derived state,
/// fail-closed for the subject-type constraint check).
pub trait ContentSource {
    /// Resolve a node by its stable identity.
    ///
    /// # Errors
    /// Returns an error if the store cannot be accessed.
    fn node(&self, id: NodeId) -> StoreResult<Option<&ContentNode>>;

    /// Set a named property on a node, replacing any existing value.
    ///
    /// # Errors
    /// Returns an error if the node does not exist or the store rejects the
    /// write.
    fn set_property(&mut self, id: NodeId, name: &str, value: PropertyValue) -> StoreResult<()>;

    /// Identities of all nodes holding a reference to the given target, in
    /// unspecified order.
    ///
    /// # Errors
    /// Returns an error if the store cannot be accessed.
    fn referrers(&self, target: NodeId) -> StoreResult<Vec<NodeId>>;
}

/// In-memory content tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentTree {
    nodes: FxHashMap<NodeId, ContentNode>,
    next_id: u64,
}

impl ContentTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(self.next_id)
    }

    /// Add a root node (no parent) of the given type.
    pub fn add_root(&mut self, node_type: NodeType) -> NodeId {
        let id = self.allocate();
        self.nodes.insert(id, ContentNode::new(id, node_type, None));
        id
    }

    /// Add a child node under `parent` with the given name and type.
    ///
    /// # Errors
    /// Returns an error if the parent does not exist.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        node_type: NodeType,
    ) -> StoreResult<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return Err(StoreError::Access(format!("unknown parent node {parent}")));
        }
        let id = self.allocate();
        self.nodes
            .insert(id, ContentNode::new(id, node_type, Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.push_child(name, id);
        }
        Ok(id)
    }

    /// Set a property on a node, replacing any existing value.
    ///
    /// # Errors
    /// Returns an error if the node does not exist.
    pub fn put_property(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> StoreResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::Access(format!("unknown node {id}")))?;
        node.put_property(name, value);
        Ok(())
    }

    /// Remove a property from a node, if present.
    ///
    /// # Errors
    /// Returns an error if the node does not exist.
    pub fn remove_property(&mut self, id: NodeId, name: &str) -> StoreResult<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or_else(|| StoreError::Access(format!("unknown node {id}")))?;
        node.remove_property(name);
        Ok(())
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ContentSource for ContentTree {
    fn node(&self, id: NodeId) -> StoreResult<Option<&ContentNode>> {
        Ok(self.nodes.get(&id))
    }

    fn set_property(&mut self, id: NodeId, name: &str, value: PropertyValue) -> StoreResult<()> {
        self.put_property(id, name, value)
    }

    fn referrers(&self, target: NodeId) -> StoreResult<Vec<NodeId>> {
        let mut found: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| {
                node.properties().any(|(_, prop)| {
                    prop.values()
                        .iter()
                        .any(|value| value.as_reference() == Some(target))
                })
            })
            .map(ContentNode::id)
            .collect();
        found.sort_unstable();
        Ok(found)
    }
}
