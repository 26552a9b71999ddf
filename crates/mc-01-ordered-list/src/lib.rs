//! # MC-01: Ordered Sibling List
//!
//! Dense rank ordering over scoped sibling groups: append, removal with
//! compaction, and move-to-rank, under concurrent callers.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (RankedEntity, MovePlan), value objects, errors, invariants
//! - **Algorithms**: Interval shift planner, removal compaction, resequencing
//! - **Ports**: Inbound (OrderedListApi) and Outbound (RankStore, RankTransaction)
//! - **Adapters**: In-memory rank store (pessimistic and optimistic)
//! - **Application**: OrderedListManager orchestration
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Density | Ranks of a scope are exactly `base..base + count` |
//! | 2 | Unique identity | An entity holds at most one rank |
//! | 3 | Single scope | Entities never change scope through the manager |
//! | 4 | Minimal touch | A move writes `|to - from| + 1` ranks |
//! | 5 | Atomicity | A failed or abandoned operation writes nothing |
//!
//! ## Usage
//!
//! ```ignore
//! use mc_01_ordered_list::{InMemoryRankStore, OrderedListApi, OrderedListManager};
//!
//! let manager = OrderedListManager::new(InMemoryRankStore::pessimistic());
//! manager.append(&restaurant, category_a).await?;
//! manager.append(&restaurant, category_b).await?;
//! manager.move_to(&restaurant, &category_b, 0).await?;
//! ```

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{InMemoryRankStore, InMemoryTransaction};
pub use application::service::OrderedListManager;
pub use config::{OrderingConfig, StoreConfig};
pub use domain::entities::*;
pub use domain::errors::{OrderingError, PlanError, StoreError};
pub use domain::value_objects::*;
pub use ports::inbound::OrderedListApi;
pub use ports::outbound::{RankStore, RankTransaction};
