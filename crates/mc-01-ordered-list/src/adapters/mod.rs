//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound store port.

mod memory_store;

pub use memory_store::{InMemoryRankStore, InMemoryTransaction};
