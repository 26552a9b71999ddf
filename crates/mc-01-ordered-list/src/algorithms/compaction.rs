//! Append, removal compaction and full resequencing
//!
//! Appends take the rank after the current maximum. Removal closes the gap by
//! pulling every higher rank down by one. Resequencing rewrites a damaged
//! scope into the dense sequence and is only used as a repair.

use crate::domain::entities::{sort_by_rank, RankedEntity};
use crate::domain::errors::PlanError;
use crate::domain::value_objects::{Rank, RankBase, RankUpdate};
use std::fmt::Display;

/// Rank for an entity appended to the end of the scope.
///
/// `max + 1`, or the base when the scope is empty.
pub fn next_rank<S, I>(current: &[RankedEntity<S, I>], base: RankBase) -> Rank {
    current
        .iter()
        .map(|e| e.rank)
        .max()
        .map_or(base.first(), |max| max + 1)
}

/// Plan the removal of `removed`.
///
/// Returns the rank being freed and the rank writes for every sibling above
/// it. Siblings below keep their rank.
pub fn plan_removal<S, I>(
    current: &[RankedEntity<S, I>],
    removed: &I,
) -> Result<(Rank, Vec<RankUpdate<I>>), PlanError>
where
    I: Clone + Eq + Display,
{
    let freed = current
        .iter()
        .find(|e| e.id == *removed)
        .map(|e| e.rank)
        .ok_or_else(|| PlanError::Missing {
            entity: removed.to_string(),
        })?;

    let mut updates: Vec<RankUpdate<I>> = current
        .iter()
        .filter(|e| e.id != *removed && e.rank > freed)
        .map(|e| RankUpdate::new(e.id.clone(), e.rank - 1))
        .collect();
    updates.sort_by_key(|u| u.rank);

    Ok((freed, updates))
}

/// Rank writes that turn `current` into the dense sequence starting at
/// `base`, keeping the existing relative order.
///
/// Entities already at their dense rank are omitted.
pub fn plan_resequence<S, I>(current: &[RankedEntity<S, I>], base: RankBase) -> Vec<RankUpdate<I>>
where
    S: Clone,
    I: Clone + Ord,
{
    let mut ordered = current.to_vec();
    sort_by_rank(&mut ordered);

    ordered
        .into_iter()
        .enumerate()
        .filter_map(|(index, e)| {
            let dense = base.rank_at(index);
            (e.rank != dense).then(|| RankUpdate::new(e.id, dense))
        })
        .collect()
}
