//! Ordered List Manager
//!
//! Main service implementing `OrderedListApi`.

use crate::algorithms::{next_rank, plan_move, plan_removal, plan_resequence};
use crate::config::OrderingConfig;
use crate::domain::entities::{MovePlan, RankedEntity};
use crate::domain::errors::OrderingError;
use crate::domain::invariants::{check_dense, invariant_unique_ids};
use crate::domain::value_objects::Rank;
use crate::ports::inbound::OrderedListApi;
use crate::ports::outbound::{RankStore, RankTransaction};
use async_trait::async_trait;

use tracing::{debug, error, info, warn};

type Listing<St> = Vec<RankedEntity<<St as RankStore>::Scope, <St as RankStore>::Id>>;

/// Ordered List Manager
///
/// Stateless between calls. Every mutating operation runs:
/// 1. Open a transaction on the scope
/// 2. Load the scope's current ranks
/// 3. Plan the rank writes (pure)
/// 4. Apply them through the same transaction
/// 5. Commit, or roll back on any error
pub struct OrderedListManager<St: RankStore> {
    store: St,
    config: OrderingConfig,
}

impl<St: RankStore> OrderedListManager<St> {
    /// Create a manager with default config
    pub fn new(store: St) -> Self {
        Self::with_config(store, OrderingConfig::default())
    }

    /// Create a manager with custom config
    pub fn with_config(store: St, config: OrderingConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &OrderingConfig {
        &self.config
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    /// Load the scope through the transaction, checking the density invariant
    /// when configured to.
    async fn load(&self, tx: &mut St::Transaction) -> Result<Listing<St>, OrderingError> {
        let listing = tx.list_scope().await?;

        if self.config.verify_on_read {
            let verdict = check_dense(&listing, self.config.rank_base).and_then(|()| {
                if invariant_unique_ids(&listing) {
                    Ok(())
                } else {
                    Err("entity listed twice".to_string())
                }
            });
            if let Err(detail) = verdict {
                error!(scope = %tx.scope(), %detail, "Scope violates the density invariant");
                return Err(OrderingError::InconsistentScope {
                    scope: tx.scope().to_string(),
                    detail,
                });
            }
        }

        Ok(listing)
    }

    /// Commit on success, roll back on failure.
    async fn finish<T: Send>(
        &self,
        tx: St::Transaction,
        outcome: Result<T, OrderingError>,
    ) -> Result<T, OrderingError> {
        match outcome {
            Ok(value) => {
                let scope = tx.scope().to_string();
                tx.commit().await.map_err(|err| {
                    let err = OrderingError::from(err);
                    if err.is_retryable() {
                        warn!(%scope, "Commit lost a race with a concurrent writer");
                    } else {
                        error!(%scope, error = %err, "Commit failed, transaction rolled back");
                    }
                    err
                })?;
                Ok(value)
            }
            Err(err) => {
                tx.rollback().await;
                Err(err)
            }
        }
    }

    async fn append_in(
        &self,
        tx: &mut St::Transaction,
        scope: &St::Scope,
        id: St::Id,
    ) -> Result<Rank, OrderingError> {
        let siblings = self.load(tx).await?;

        if siblings.iter().any(|e| e.id == id) {
            return Err(OrderingError::AlreadyRanked {
                entity: id.to_string(),
            });
        }
        if siblings.len() >= self.config.max_scope_size {
            return Err(OrderingError::ScopeFull {
                scope: scope.to_string(),
                size: siblings.len(),
                max: self.config.max_scope_size,
            });
        }

        let rank = next_rank(&siblings, self.config.rank_base);
        tx.insert(RankedEntity::new(scope.clone(), id, rank)).await?;
        Ok(rank)
    }

    async fn remove_in(
        &self,
        tx: &mut St::Transaction,
        scope: &St::Scope,
        id: &St::Id,
    ) -> Result<(Rank, usize), OrderingError> {
        let siblings = self.load(tx).await?;
        let (freed, updates) = plan_removal(&siblings, id).map_err(|e| e.in_scope(scope))?;

        tx.delete(id).await?;
        tx.batch_update_ranks(&updates).await?;
        Ok((freed, updates.len()))
    }

    async fn move_in(
        &self,
        tx: &mut St::Transaction,
        scope: &St::Scope,
        id: &St::Id,
        target: Rank,
    ) -> Result<MovePlan<St::Id>, OrderingError> {
        let siblings = self.load(tx).await?;
        let plan = plan_move(&siblings, id, target, self.config.rank_base)
            .map_err(|e| e.in_scope(scope))?;

        tx.batch_update_ranks(&plan.updates()).await?;
        Ok(plan)
    }

    async fn resequence_in(&self, tx: &mut St::Transaction) -> Result<usize, OrderingError> {
        // Repair reads the raw scope; it exists for scopes that fail verification
        let siblings = tx.list_scope().await?;
        let updates = plan_resequence(&siblings, self.config.rank_base);

        tx.batch_update_ranks(&updates).await?;
        Ok(updates.len())
    }
}

fn log_rejection(op: &'static str, scope: &dyn std::fmt::Display, err: &OrderingError) {
    match err {
        OrderingError::Store(_) | OrderingError::InconsistentScope { .. } => {
            error!(op, scope = %scope, error = %err, "Ordering operation failed")
        }
        _ => warn!(op, scope = %scope, error = %err, "Ordering operation rejected"),
    }
}

#[async_trait]
impl<St: RankStore> OrderedListApi for OrderedListManager<St> {
    type Scope = St::Scope;
    type Id = St::Id;

    async fn append(&self, scope: &St::Scope, id: St::Id) -> Result<Rank, OrderingError> {
        let entity = id.to_string();
        let mut tx = self.store.begin(scope).await?;
        let outcome = self.append_in(&mut tx, scope, id).await;
        let result = self.finish(tx, outcome).await;

        match &result {
            Ok(rank) => info!(scope = %scope, %entity, rank, "Entity appended"),
            Err(err) => log_rejection("append", scope, err),
        }
        result
    }

    async fn remove(&self, scope: &St::Scope, id: &St::Id) -> Result<(), OrderingError> {
        let mut tx = self.store.begin(scope).await?;
        let outcome = self.remove_in(&mut tx, scope, id).await;
        let result = self.finish(tx, outcome).await;

        match &result {
            Ok((freed, compacted)) => info!(
                scope = %scope,
                entity = %id,
                freed,
                compacted,
                "Entity removed"
            ),
            Err(err) => log_rejection("remove", scope, err),
        }
        result.map(|_| ())
    }

    async fn move_to(
        &self,
        scope: &St::Scope,
        id: &St::Id,
        target: Rank,
    ) -> Result<MovePlan<St::Id>, OrderingError> {
        let mut tx = self.store.begin(scope).await?;
        let outcome = self.move_in(&mut tx, scope, id, target).await;
        let result = self.finish(tx, outcome).await;

        match &result {
            Ok(plan) => info!(
                scope = %scope,
                entity = %id,
                from = plan.from,
                to = plan.to(),
                shifted = plan.shifted.len(),
                "Entity moved"
            ),
            Err(err) => log_rejection("move_to", scope, err),
        }
        result
    }

    async fn list(&self, scope: &St::Scope) -> Result<Vec<St::Id>, OrderingError> {
        let listing = self.store.list_by_scope(scope).await?;
        debug!(scope = %scope, count = listing.len(), "Scope listed");
        Ok(listing.into_iter().map(|e| e.id).collect())
    }

    async fn locate(&self, id: &St::Id) -> Result<RankedEntity<St::Scope, St::Id>, OrderingError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| OrderingError::UnknownEntity {
                entity: id.to_string(),
            })
    }

    async fn resequence(&self, scope: &St::Scope) -> Result<usize, OrderingError> {
        let mut tx = self.store.begin(scope).await?;
        let outcome = self.resequence_in(&mut tx).await;
        let result = self.finish(tx, outcome).await;

        match &result {
            Ok(rewritten) => info!(scope = %scope, rewritten, "Scope resequenced"),
            Err(err) => log_rejection("resequence", scope, err),
        }
        result
    }
}
