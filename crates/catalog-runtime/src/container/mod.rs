//! # Catalog Container
//!
//! Holds the ordered lists of the catalog and the handler that serves them.
//! Every list gets its own store; all of them share one configuration.

pub mod catalog;
pub mod config;

pub use catalog::{CatalogContainer, CategoryList, MenuItemList, RecommendationList, RuntimeHandler};
pub use config::{ConfigError, RuntimeConfig};
