//! Value objects for the ordered sibling list
//!
//! Ranks, rank bases, concurrency disciplines and the key bound shared by
//! scope and entity identifiers.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Dense position of an entity within its scope.
///
/// Signed so that a caller-supplied negative target is representable and can be
/// rejected as out of range instead of failing to parse.
pub type Rank = i64;

/// Bound for scope keys and entity identifiers.
///
/// The manager never looks inside a key; it only compares, hashes, orders and
/// prints it.
pub trait Key: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static {}

impl<T> Key for T where T: Clone + Eq + Hash + Ord + Debug + Display + Send + Sync + 'static {}

/// First rank of every scope.
///
/// Fixed for the lifetime of a manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankBase {
    /// Ranks start at 0
    #[default]
    Zero,
    /// Ranks start at 1
    One,
}

impl RankBase {
    /// The lowest rank a scope can hold.
    pub fn first(self) -> Rank {
        match self {
            RankBase::Zero => 0,
            RankBase::One => 1,
        }
    }

    /// Rank of the `index`-th entity (0-based) in display order.
    pub fn rank_at(self, index: usize) -> Rank {
        self.first() + index as Rank
    }

    /// Exclusive upper bound for a scope holding `count` entities.
    pub fn end(self, count: usize) -> Rank {
        self.rank_at(count)
    }

    /// Parse `0` or `1`.
    pub fn from_first(first: Rank) -> Option<Self> {
        match first {
            0 => Some(RankBase::Zero),
            1 => Some(RankBase::One),
            _ => None,
        }
    }
}

/// How a store serializes mutating operations on the same scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyMode {
    /// Scope lock taken when the transaction opens, held until it ends.
    #[default]
    Pessimistic,
    /// Scope version captured at read, checked at commit.
    Optimistic,
}

impl ConcurrencyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ConcurrencyMode::Pessimistic => "pessimistic",
            ConcurrencyMode::Optimistic => "optimistic",
        }
    }
}

impl std::str::FromStr for ConcurrencyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pessimistic" => Ok(ConcurrencyMode::Pessimistic),
            "optimistic" => Ok(ConcurrencyMode::Optimistic),
            other => Err(format!("unknown concurrency mode '{}'", other)),
        }
    }
}

/// New rank for one entity, as produced by the planner and applied by the
/// store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankUpdate<I> {
    pub id: I,
    pub rank: Rank,
}

impl<I> RankUpdate<I> {
    pub fn new(id: I, rank: Rank) -> Self {
        Self { id, rank }
    }
}
