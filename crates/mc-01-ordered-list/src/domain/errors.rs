//! Error types for the ordered sibling list

use super::value_objects::Rank;
use thiserror::Error;

/// All errors the ordered list manager returns to its caller
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Entity absent from the scope (or from the store)
    #[error("Entity {entity} not found in scope {scope}")]
    NotFound { scope: String, entity: String },

    /// Entity unknown to the store
    #[error("Entity {entity} not found")]
    UnknownEntity { entity: String },

    /// Target rank outside the scope's bounds
    #[error("Target rank {target} out of range: expected {min}..{max}")]
    OutOfRange { target: Rank, min: Rank, max: Rank },

    /// Target rank equals the current rank
    #[error("Entity {entity} is already at rank {rank}")]
    NoOp { entity: String, rank: Rank },

    /// Concurrent write on the same scope since it was read
    #[error("Concurrent modification of scope {scope}, retry the operation")]
    Conflict { scope: String },

    /// Append of an id that already holds a rank
    #[error("Entity {entity} already holds a rank")]
    AlreadyRanked { entity: String },

    /// Scope holds the configured maximum number of entities
    #[error("Scope {scope} is full: {size} >= {max}")]
    ScopeFull { scope: String, size: usize, max: usize },

    /// Stored ranks violate the density invariant
    #[error("Scope {scope} has inconsistent ranks: {detail}")]
    InconsistentScope { scope: String, detail: String },

    /// Underlying storage failure
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl OrderingError {
    /// Entity or scope absent.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrderingError::NotFound { .. } | OrderingError::UnknownEntity { .. }
        )
    }

    /// True when retrying the whole operation may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderingError::Conflict { .. })
    }
}

/// Errors raised by a store adapter
#[derive(Debug, Error)]
pub enum StoreError {
    /// Scope changed between read and commit (optimistic discipline)
    #[error("Version conflict on scope {scope}: read {expected}, found {found}")]
    VersionConflict {
        scope: String,
        expected: u64,
        found: u64,
    },

    /// Row already present
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Transaction already finished
    #[error("Transaction already closed")]
    TransactionClosed,

    /// Store not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Planner precondition failures, before the scope is attached
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Entity {entity} not present")]
    Missing { entity: String },

    #[error("Target rank {target} out of range: expected {min}..{max}")]
    OutOfRange { target: Rank, min: Rank, max: Rank },

    #[error("Entity {entity} is already at rank {rank}")]
    NoOp { entity: String, rank: Rank },
}

impl PlanError {
    /// Attach the scope the plan was computed for.
    pub fn in_scope(self, scope: &impl std::fmt::Display) -> OrderingError {
        match self {
            PlanError::Missing { entity } => OrderingError::NotFound {
                scope: scope.to_string(),
                entity,
            },
            PlanError::OutOfRange { target, min, max } => {
                OrderingError::OutOfRange { target, min, max }
            }
            PlanError::NoOp { entity, rank } => OrderingError::NoOp { entity, rank },
        }
    }
}

impl From<StoreError> for OrderingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::VersionConflict { scope, .. } => OrderingError::Conflict { scope },
            StoreError::DuplicateKey(entity) => OrderingError::AlreadyRanked { entity },
            other => OrderingError::Store(other),
        }
    }
}
