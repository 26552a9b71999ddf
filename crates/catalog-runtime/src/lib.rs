//! # Catalog Runtime Library
//!
//! Exposes the container and the command driver for testing.
//! The main entry point is the `main.rs` binary.

pub mod container;
pub mod driver;

pub use container::{CatalogContainer, ConfigError, RuntimeConfig};
pub use driver::{process_line, run, Command, DriverStats};
