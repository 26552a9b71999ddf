//! Domain invariants for the ordered sibling list
//!
//! Every scope, at every commit point, must satisfy these.

use super::entities::{MovePlan, RankedEntity};
use super::value_objects::{Rank, RankBase};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// INVARIANT-1: Density
/// The ranks of a scope are exactly `{base, ..., base + count - 1}`.
pub fn invariant_dense<S, I>(entities: &[RankedEntity<S, I>], base: RankBase) -> bool {
    check_dense(entities, base).is_ok()
}

/// Same as [`invariant_dense`], with a description of the first violation.
pub fn check_dense<S, I>(entities: &[RankedEntity<S, I>], base: RankBase) -> Result<(), String> {
    let end = base.end(entities.len());
    let mut seen = HashSet::with_capacity(entities.len());

    for entity in entities {
        if entity.rank < base.first() || entity.rank >= end {
            return Err(format!(
                "rank {} outside {}..{}",
                entity.rank,
                base.first(),
                end
            ));
        }
        if !seen.insert(entity.rank) {
            return Err(format!("rank {} held twice", entity.rank));
        }
    }

    Ok(())
}

/// INVARIANT-2: Unique identity
/// No entity appears twice within a scope listing.
pub fn invariant_unique_ids<S, I: Eq + Hash>(entities: &[RankedEntity<S, I>]) -> bool {
    let mut seen = HashSet::with_capacity(entities.len());
    entities.iter().all(|e| seen.insert(&e.id))
}

/// INVARIANT-3: Single scope
/// Every entity of a listing belongs to the scope that was listed.
pub fn invariant_single_scope<S: PartialEq, I>(entities: &[RankedEntity<S, I>], scope: &S) -> bool {
    entities.iter().all(|e| e.scope == *scope)
}

/// INVARIANT-4: Minimal touch
/// A move changes exactly `|to - from| + 1` ranks: the mover plus each
/// sibling strictly between the old and new position.
pub fn invariant_minimal_touch<I: Clone>(plan: &MovePlan<I>) -> bool {
    let distance = (plan.to() - plan.from).unsigned_abs() as usize;
    plan.touched() == distance + 1
}

/// Ranks that differ between two listings of the same scope.
///
/// Entities present in only one listing are ignored.
pub fn changed_ranks<S, I: Clone + Eq + Hash>(
    before: &[RankedEntity<S, I>],
    after: &[RankedEntity<S, I>],
) -> Vec<(I, Rank, Rank)> {
    let previous: HashMap<&I, Rank> = before.iter().map(|e| (&e.id, e.rank)).collect();

    after
        .iter()
        .filter_map(|e| match previous.get(&e.id) {
            Some(&old) if old != e.rank => Some((e.id.clone(), old, e.rank)),
            _ => None,
        })
        .collect()
}
