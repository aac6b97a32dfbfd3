//! Traversal context threaded through the recursive descent of one commit.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::store::{ContentSource, NodeId, NodeType, StoreResult};

/// The ordered ancestor chain of the node currently being visited, plus the
/// nearest enclosing Subject seen so far.
///
/// A context is a plain value owned by exactly one commit: descending into a
/// child derives a new context instead of mutating shared state, so nothing
/// about the traversal is ambient or visible to another commit.
#[derive(Debug, Clone, Default)]
pub struct WalkContext {
    /// Root of the mutated subtree first, current node last
    ancestors: SmallVec<[NodeId; 8]>,
    subject: Option<NodeId>,
}

impl WalkContext {
    /// Context before entering the first node of a commit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the context for entering `child`.
    ///
    /// `child_is_subject` updates the enclosing-Subject reference when the
    /// child itself is a Subject node.
    #[must_use]
    pub fn descend(&self, child: NodeId, child_is_subject: bool) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(child);
        Self {
            ancestors,
            subject: if child_is_subject { Some(child) } else { self.subject },
        }
    }

    /// The node currently being visited, if the context has entered one.
    #[must_use]
    pub fn current(&self) -> Option<NodeId> {
        self.ancestors.last().copied()
    }

    /// The full chain from the root of the mutated subtree to the current
    /// node, in that order.
    #[must_use]
    pub fn ancestors(&self) -> &[NodeId] {
        &self.ancestors
    }

    /// Ancestors of the current node, nearest first, excluding the current
    /// node itself.
    pub fn ancestors_above(&self) -> impl Iterator<Item = NodeId> + '_ {
        let end = self.ancestors.len().saturating_sub(1);
        self.ancestors[..end].iter().rev().copied()
    }

    /// The nearest enclosing Subject node, if one has been entered.
    #[must_use]
    pub const fn enclosing_subject(&self) -> Option<NodeId> {
        self.subject
    }

    /// How many nodes deep the traversal currently is.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Reconstruct the context at an arbitrary node by following parent
    /// links, for callers evaluating conditions outside a commit traversal
    /// (e.g. while serializing a form). A cyclic parent chain stops at the
    /// first revisited node.
    ///
    /// # Errors
    /// Returns an error if the store cannot be accessed.
    pub fn at_node<S: ContentSource>(store: &S, node: NodeId) -> StoreResult<Self> {
        // Collected leaf first, then replayed from the root down.
        let mut chain: Vec<(NodeId, bool)> = Vec::new();
        let mut seen: FxHashSet<NodeId> = FxHashSet::default();
        let mut current = Some(node);
        while let Some(id) = current {
            if !seen.insert(id) {
                break;
            }
            let Some(found) = store.node(id)? else {
                break;
            };
            chain.push((id, matches!(found.node_type(), NodeType::Subject)));
            current = found.parent();
        }

        let mut ctx = Self::new();
        for (id, is_subject) in chain.into_iter().rev() {
            ctx = ctx.descend(id, is_subject);
        }
        Ok(ctx)
    }
}
