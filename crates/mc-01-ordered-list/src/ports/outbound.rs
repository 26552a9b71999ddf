//! Outbound Ports (Driven Ports / SPI)
//!
//! The store adapter the manager is written against. The backing store is the
//! only durable owner of rank values.

use crate::domain::entities::RankedEntity;
use crate::domain::errors::StoreError;
use crate::domain::value_objects::{ConcurrencyMode, Key, RankUpdate};
use async_trait::async_trait;

/// Scoped access to the persisted ranked collection.
///
/// Production: a relational table with a `(scope, rank)` unique index.
/// Testing: `InMemoryRankStore` (adapters).
#[async_trait]
pub trait RankStore: Send + Sync {
    /// Sibling group key
    type Scope: Key;
    /// Entity identity
    type Id: Key;
    /// Open transaction bound to one scope
    type Transaction: RankTransaction<Scope = Self::Scope, Id = Self::Id>;

    /// All entities of a scope, ascending by rank, from one consistent
    /// snapshot.
    async fn list_by_scope(
        &self,
        scope: &Self::Scope,
    ) -> Result<Vec<RankedEntity<Self::Scope, Self::Id>>, StoreError>;

    /// Single-row lookup by identity.
    async fn get(
        &self,
        id: &Self::Id,
    ) -> Result<Option<RankedEntity<Self::Scope, Self::Id>>, StoreError>;

    /// Open a transaction over `scope`.
    ///
    /// Under [`ConcurrencyMode::Pessimistic`] this waits for and takes the
    /// scope lock; the lock is released when the transaction commits, rolls
    /// back, or is dropped.
    async fn begin(&self, scope: &Self::Scope) -> Result<Self::Transaction, StoreError>;

    /// Discipline this store uses for same-scope writers.
    fn concurrency(&self) -> ConcurrencyMode;
}

/// A transaction over one scope.
///
/// Writes are invisible to other callers until [`commit`](Self::commit)
/// succeeds. Dropping the transaction without committing rolls it back, so
/// every exit path (error return, panic, cancelled future) releases it.
#[async_trait]
pub trait RankTransaction: Send {
    type Scope: Key;
    type Id: Key;

    /// Scope this transaction is bound to.
    fn scope(&self) -> &Self::Scope;

    /// The scope as seen by this transaction, ascending by rank.
    async fn list_scope(
        &mut self,
    ) -> Result<Vec<RankedEntity<Self::Scope, Self::Id>>, StoreError>;

    /// Insert a new ranked row.
    async fn insert(
        &mut self,
        entity: RankedEntity<Self::Scope, Self::Id>,
    ) -> Result<(), StoreError>;

    /// Delete a row.
    async fn delete(&mut self, id: &Self::Id) -> Result<(), StoreError>;

    /// Apply rank writes inside this transaction.
    async fn batch_update_ranks(
        &mut self,
        updates: &[RankUpdate<Self::Id>],
    ) -> Result<(), StoreError>;

    /// Make all writes visible atomically.
    ///
    /// On error nothing was applied.
    async fn commit(self) -> Result<(), StoreError>;

    /// Discard all writes.
    async fn rollback(self);
}
