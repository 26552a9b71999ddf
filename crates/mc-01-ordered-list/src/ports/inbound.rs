//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{MovePlan, RankedEntity};
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::{Key, Rank};
use async_trait::async_trait;

/// Ordered sibling list API
///
/// The only code path allowed to write rank values. Every mutating call runs
/// in its own store transaction.
#[async_trait]
pub trait OrderedListApi: Send + Sync {
    type Scope: Key;
    type Id: Key;

    /// Rank `id` at the end of `scope` and return the assigned rank.
    async fn append(&self, scope: &Self::Scope, id: Self::Id) -> Result<Rank, OrderingError>;

    /// Remove `id` from `scope`, pulling every higher rank down by one.
    async fn remove(&self, scope: &Self::Scope, id: &Self::Id) -> Result<(), OrderingError>;

    /// Move `id` to `target`, shifting the siblings in between.
    ///
    /// Returns the plan that was applied.
    async fn move_to(
        &self,
        scope: &Self::Scope,
        id: &Self::Id,
        target: Rank,
    ) -> Result<MovePlan<Self::Id>, OrderingError>;

    /// Ids of `scope` in display order.
    async fn list(&self, scope: &Self::Scope) -> Result<Vec<Self::Id>, OrderingError>;

    /// Current scope and rank of `id`.
    async fn locate(
        &self,
        id: &Self::Id,
    ) -> Result<RankedEntity<Self::Scope, Self::Id>, OrderingError>;

    /// Rewrite `scope` into the dense sequence, keeping relative order.
    ///
    /// Repair only. Returns the number of rows rewritten.
    async fn resequence(&self, scope: &Self::Scope) -> Result<usize, OrderingError>;
}
