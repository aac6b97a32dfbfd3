//! Error handling for the commit pipeline.
//!
//! Errors are split in two tiers: [`StoreError`] for failures of the
//! underlying content store, and [`CommitError`] for outcomes that abort a
//! commit. Ordinary resolution misses (a reference pointing at nothing, a
//! missing answer) are not errors at all and are modeled as `Option`/absent
//! values at the call sites.

/// Failure of a content-store access.
///
/// Distinct from a resolution miss: a miss is `Ok(None)` from the store,
/// while a `StoreError` means the store itself could not answer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be accessed
    #[error("store access failed: {0}")]
    Access(String),

    /// The store rejected a property write
    #[error("property write failed on node {node}: {reason}")]
    Write {
        /// Identity of the node being written
        node: u64,
        /// Why the write was rejected
        reason: String,
    },
}

/// The kind of conflict carried by a commit rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The commit would leave the tree in an invalid state
    State,
    /// The commit violates a structural constraint
    Constraint,
    /// The commit is not permitted
    Access,
}

/// Errors that abort a commit.
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// The commit was rejected by a validator
    #[error("commit rejected ({code}): {message}")]
    Conflict {
        /// Conflict classification
        kind: ConflictKind,
        /// HTTP-equivalent status code (400/409)
        code: u16,
        /// Human-readable description of the violation
        message: String,
    },

    /// An unexpected error escaped a fail-closed check
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CommitError {
    /// Create a conflict with the given classification, code and message.
    #[must_use]
    pub fn conflict(kind: ConflictKind, code: u16, message: impl Into<String>) -> Self {
        Self::Conflict {
            kind,
            code,
            message: message.into(),
        }
    }

    /// Whether this error is a validator rejection rather than an internal failure.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Result type for commit processing
pub type Result<T> = std::result::Result<T, CommitError>;
