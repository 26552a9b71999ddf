//! Core entities for the ordered sibling list

use super::value_objects::{Rank, RankUpdate};
use serde::{Deserialize, Serialize};

/// The view of a stored row the manager works with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedEntity<S, I> {
    /// Opaque entity identity
    pub id: I,
    /// Sibling group the entity belongs to
    pub scope: S,
    /// Current position within the scope
    pub rank: Rank,
}

impl<S, I> RankedEntity<S, I> {
    pub fn new(scope: S, id: I, rank: Rank) -> Self {
        Self { id, scope, rank }
    }
}

/// Result of planning a move: the mover plus every sibling whose rank shifts.
///
/// Siblings outside the shifted interval are not listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePlan<I> {
    /// The moving entity with its new rank
    pub moved: RankUpdate<I>,
    /// Rank the mover held before the move
    pub from: Rank,
    /// Siblings shifted by one towards the vacated rank
    pub shifted: Vec<RankUpdate<I>>,
}

impl<I: Clone> MovePlan<I> {
    /// Rank the mover ends up at.
    pub fn to(&self) -> Rank {
        self.moved.rank
    }

    /// Number of entities whose rank changes, mover included.
    pub fn touched(&self) -> usize {
        self.shifted.len() + 1
    }

    /// Every rank write the plan needs, shifted siblings first.
    pub fn updates(&self) -> Vec<RankUpdate<I>> {
        let mut updates = self.shifted.clone();
        updates.push(self.moved.clone());
        updates
    }
}

/// Sort entities into display order.
///
/// Ties (only possible in damaged data) fall back to the entity id so the
/// order stays deterministic.
pub fn sort_by_rank<S, I: Ord>(entities: &mut [RankedEntity<S, I>]) {
    entities.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));
}
