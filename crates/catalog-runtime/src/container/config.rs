//! # Runtime Configuration
//!
//! Defaults from the ordered list crate, overridden by environment variables:
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `MC_RANK_BASE` | `0`, `1` | `0` |
//! | `MC_CONCURRENCY` | `pessimistic`, `optimistic` | `pessimistic` |
//! | `MC_MAX_SCOPE_SIZE` | positive integer | `10000` |
//! | `MC_VERIFY_ON_READ` | `true`, `false` | `true` |

use mc_01_ordered_list::{ConcurrencyMode, OrderingConfig, Rank, RankBase, StoreConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_RANK_BASE: &str = "MC_RANK_BASE";
pub const ENV_CONCURRENCY: &str = "MC_CONCURRENCY";
pub const ENV_MAX_SCOPE_SIZE: &str = "MC_MAX_SCOPE_SIZE";
pub const ENV_VERIFY_ON_READ: &str = "MC_VERIFY_ON_READ";

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Applied to every ordered list.
    pub ordering: OrderingConfig,
    /// Applied to every in-memory store.
    pub store: StoreConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}='{value}' is invalid: expected {expected}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl RuntimeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_RANK_BASE) {
            config.ordering.rank_base = value
                .trim()
                .parse::<Rank>()
                .ok()
                .and_then(RankBase::from_first)
                .ok_or_else(|| invalid(ENV_RANK_BASE, value, "0 or 1"))?;
        }

        if let Some(value) = lookup(ENV_CONCURRENCY) {
            config.store.concurrency = value
                .trim()
                .parse::<ConcurrencyMode>()
                .map_err(|_| invalid(ENV_CONCURRENCY, value, "pessimistic or optimistic"))?;
        }

        if let Some(value) = lookup(ENV_MAX_SCOPE_SIZE) {
            config.ordering.max_scope_size = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| invalid(ENV_MAX_SCOPE_SIZE, value, "a positive integer"))?;
        }

        if let Some(value) = lookup(ENV_VERIFY_ON_READ) {
            config.ordering.verify_on_read = value
                .trim()
                .parse::<bool>()
                .map_err(|_| invalid(ENV_VERIFY_ON_READ, value, "true or false"))?;
        }

        Ok(config)
    }
}

fn invalid(var: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value,
        expected,
    }
}
