//! Interval Shift Reorder Planner
//!
//! Moving an entity from rank `cur` to rank `target` only disturbs the ranks
//! strictly between the two positions:
//!
//! ```text
//! target < cur:  [target, cur)  shift up by one
//! target > cur:  (cur, target]  shift down by one
//! ```
//!
//! Everything outside that interval keeps its rank and is left out of the
//! plan, so the store writes `|target - cur| + 1` rows instead of the whole
//! scope.

use crate::domain::entities::{MovePlan, RankedEntity};
use crate::domain::errors::PlanError;
use crate::domain::value_objects::{Rank, RankBase, RankUpdate};
use std::fmt::Display;

/// Plan the move of `moving` to `target` within one scope.
///
/// `current` is the full listing of the scope. The planner is pure: it reads
/// the listing and returns the rank writes, nothing else.
///
/// # Errors
///
/// - [`PlanError::Missing`] if `moving` is not in `current`
/// - [`PlanError::OutOfRange`] if `target` is outside `base..base + len`
/// - [`PlanError::NoOp`] if `target` is the current rank
pub fn plan_move<S, I>(
    current: &[RankedEntity<S, I>],
    moving: &I,
    target: Rank,
    base: RankBase,
) -> Result<MovePlan<I>, PlanError>
where
    I: Clone + Eq + Display,
{
    let mover = current
        .iter()
        .find(|e| e.id == *moving)
        .ok_or_else(|| PlanError::Missing {
            entity: moving.to_string(),
        })?;

    let (min, max) = (base.first(), base.end(current.len()));
    if target < min || target >= max {
        return Err(PlanError::OutOfRange { target, min, max });
    }

    let cur = mover.rank;
    if target == cur {
        return Err(PlanError::NoOp {
            entity: moving.to_string(),
            rank: cur,
        });
    }

    let mut shifted: Vec<RankUpdate<I>> = current
        .iter()
        .filter(|e| e.id != *moving)
        .filter_map(|e| {
            if target < cur && e.rank >= target && e.rank < cur {
                Some(RankUpdate::new(e.id.clone(), e.rank + 1))
            } else if target > cur && e.rank > cur && e.rank <= target {
                Some(RankUpdate::new(e.id.clone(), e.rank - 1))
            } else {
                None
            }
        })
        .collect();

    // Stable output regardless of listing order
    shifted.sort_by_key(|u| u.rank);

    Ok(MovePlan {
        moved: RankUpdate::new(moving.clone(), target),
        from: cur,
        shifted,
    })
}

/// Apply a plan to a listing in place, returning the listing in display order.
///
/// Used by callers that keep a local copy of a scope (and by tests to compare
/// against a full resequence).
pub fn apply_plan<S, I>(current: &mut [RankedEntity<S, I>], plan: &MovePlan<I>)
where
    I: Clone + Eq + Ord,
{
    for update in plan.updates() {
        if let Some(entity) = current.iter_mut().find(|e| e.id == update.id) {
            entity.rank = update.rank;
        }
    }
    crate::domain::entities::sort_by_rank(current);
}
