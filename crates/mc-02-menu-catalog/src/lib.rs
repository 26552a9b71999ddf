//! # MC-02: Menu Catalog Ordering
//!
//! The three places the catalog keeps a display order, wired onto the
//! ordered sibling list:
//!
//! | Adapter | Scope | Ranked entity |
//! |---------|-------|---------------|
//! | `CategoryOrdering` | restaurant | category |
//! | `MenuItemOrdering` | category | menu item |
//! | `RecommendationOrdering` | source menu item | recommendation edge |
//!
//! ## Architecture
//!
//! - **Domain**: `CatalogError` and its status mapping
//! - **Application**: one thin adapter per call site, generic over `OrderedListApi`
//! - **IPC**: JSON request parsing and the `CatalogOrderingHandler`
//!
//! Adapters never touch rank values; every write goes through the list manager.

pub mod application;
pub mod domain;
pub mod ipc;

pub use application::{CategoryOrdering, MenuItemOrdering, RecommendationOrdering};
pub use domain::errors::CatalogError;
pub use ipc::{CatalogOrderingHandler, OrderingResponse};
