//! Commit processing.
//!
//! A commit is the atomic application of one mutation batch. Before the
//! batch becomes durable, a [`CommitWorker`] descends the mutated subtree
//! once, carrying a [`WalkContext`] down through the recursion: on entering
//! an added node the referential validators run (and may abort the whole
//! commit), and on leaving a Subject node its derived identifier is
//! recomputed. The walk is synchronous and single-threaded; all state it
//! needs travels as explicit values, and the worker's reusable scratch is
//! released on every exit path so a later commit on the same worker never
//! observes stale context.

pub mod context;

pub use context::WalkContext;

use anyhow::Context;
use rustc_hash::FxHashSet;

use crate::config::CommitConfig;
use crate::error::Result;
use crate::form::RequiredSubjectTypesValidator;
use crate::store::{ContentSource, NodeId, NodeType};
use crate::subject;

/// Description of one mutation batch: the root of the mutated subtree and
/// the set of nodes the batch added (as opposed to changed).
#[derive(Debug, Clone)]
pub struct Commit {
    root: NodeId,
    added: FxHashSet<NodeId>,
}

impl Commit {
    /// Describe a batch that mutated the subtree under `root`.
    #[must_use]
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            added: FxHashSet::default(),
        }
    }

    /// Mark a node as added by this batch.
    #[must_use]
    pub fn with_added(mut self, id: NodeId) -> Self {
        self.added.insert(id);
        self
    }

    /// Root of the mutated subtree.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Whether this batch added the given node.
    #[must_use]
    pub fn is_added(&self, id: NodeId) -> bool {
        self.added.contains(&id)
    }
}

/// Processes commits, one at a time, on the calling thread.
///
/// A worker may be reused across commits but is owned by one commit at a
/// time; [`CommitWorker::process`] clears the worker's scratch state before
/// returning, whether the commit succeeded or aborted.
#[derive(Debug, Default)]
pub struct CommitWorker {
    config: CommitConfig,
    validator: RequiredSubjectTypesValidator,
    /// Visited-node scratch for identifier derivation, commit-scoped
    visited: FxHashSet<NodeId>,
}

impl CommitWorker {
    /// Create a worker with the given configuration.
    #[must_use]
    pub fn new(config: CommitConfig) -> Self {
        Self {
            config,
            validator: RequiredSubjectTypesValidator,
            visited: FxHashSet::default(),
        }
    }

    /// The worker's configuration.
    #[must_use]
    pub const fn config(&self) -> &CommitConfig {
        &self.config
    }

    /// Whether the worker still holds traversal state from a commit. Always
    /// `false` between commits.
    #[must_use]
    pub fn has_residual_state(&self) -> bool {
        !self.visited.is_empty()
    }

    /// Run the commit-time pipeline over one mutation batch.
    ///
    /// On success the derived properties have been written in place; on
    /// error the surrounding transaction is expected to discard the batch.
    ///
    /// # Errors
    /// Returns [`CommitError::Conflict`](crate::error::CommitError::Conflict)
    /// when a validator rejects the batch, or
    /// [`CommitError::Internal`](crate::error::CommitError::Internal) when
    /// the store fails during a fail-closed check.
    pub fn process<S: ContentSource>(&mut self, store: &mut S, commit: &Commit) -> Result<()> {
        let result = self.walk(store, &WalkContext::new(), commit.root(), commit);
        // Released on success and on abort alike, so the next commit on this
        // worker starts from a clean slate.
        self.visited.clear();
        result
    }

    fn walk<S: ContentSource>(
        &mut self,
        store: &mut S,
        ctx: &WalkContext,
        node_id: NodeId,
        commit: &Commit,
    ) -> Result<()> {
        let (is_subject, children) = {
            let node = store
                .node(node_id)
                .with_context(|| format!("reading node {node_id} during commit traversal"))?;
            let Some(node) = node else {
                log::warn!("Node {node_id} disappeared during commit traversal, skipping subtree");
                return Ok(());
            };
            (
                matches!(node.node_type(), NodeType::Subject),
                node.child_ids().collect::<Vec<NodeId>>(),
            )
        };
        let ctx = ctx.descend(node_id, is_subject);

        if commit.is_added(node_id) && self.config.enforce_required_subject_types {
            let node = store
                .node(node_id)
                .with_context(|| format!("reading added node {node_id} for validation"))?;
            if let Some(node) = node {
                self.validator.validate_added_node(&*store, node)?;
            }
        }

        for child in children {
            self.walk(store, &ctx, child, commit)?;
        }

        if is_subject {
            subject::derive_full_identifier(store, node_id, &mut self.visited);
        }
        Ok(())
    }
}
