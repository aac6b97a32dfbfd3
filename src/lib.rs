//! A Rust library for commit-time validation and derived state in
//! hierarchical clinical record trees.
//!
//! Clinical records (questionnaires, subjects, forms, answers) live in a
//! typed content tree. Every mutation batch to that tree is processed as one
//! commit: a single synchronous traversal of the mutated subtree that
//! recomputes derived state and enforces referential constraints before the
//! batch becomes durable. This crate provides:
//!
//! - the [`store`] module: the typed tree model and the [`ContentSource`]
//!   contract through which the pipeline sees the storage collaborator;
//! - the [`commit`] module: the ancestor-aware traversal ([`WalkContext`])
//!   and the [`CommitWorker`] driving it;
//! - the [`subject`] module: derivation of the hierarchical
//!   `fullIdentifier` on Subject nodes;
//! - the [`form`] module: the commit-rejecting required-subject-types
//!   validator;
//! - the [`conditional`] module: the typed condition-tree evaluator behind
//!   [`is_condition_satisfied`].

pub mod commit;
pub mod conditional;
pub mod config;
pub mod error;
pub mod form;
pub mod store;
pub mod subject;

// Core types
pub use commit::{Commit, CommitWorker, WalkContext};
pub use conditional::{Comparator, is_condition_satisfied};
pub use config::CommitConfig;
pub use error::{CommitError, ConflictKind, Result, StoreError};
pub use form::RequiredSubjectTypesValidator;
pub use store::{
    ContentNode, ContentSource, ContentTree, NodeId, NodeType, PropertyValue, Value, ValueKind,
};
pub use subject::derive_full_identifier;
