//! Configuration for the ordered sibling list

use crate::domain::value_objects::{ConcurrencyMode, RankBase};
use serde::{Deserialize, Serialize};

/// Manager configuration
///
/// Read once at construction; the rank base never changes for the lifetime of
/// a manager.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// First rank of every scope
    pub rank_base: RankBase,
    /// Maximum entities per scope (appends beyond this are rejected)
    pub max_scope_size: usize,
    /// Check the density invariant on every scope a mutation loads
    pub verify_on_read: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            rank_base: RankBase::Zero,
            max_scope_size: 10_000,
            verify_on_read: true,
        }
    }
}

/// Store configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Discipline for same-scope writers
    pub concurrency: ConcurrencyMode,
}
