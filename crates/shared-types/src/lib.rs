//! # Shared Types Crate
//!
//! Identifiers of the menu catalog, shared by the call-site adapters, the
//! runtime and the test suite.
//!
//! ## Design Principles
//!
//! - **Opaque to the ordering core**: the core only needs `Clone + Eq + Hash +
//!   Ord + Display`; every id here satisfies that.
//! - **One type per role**: a category id can never be passed where a menu
//!   item id is expected.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
