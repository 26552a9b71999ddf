//! Domain layer for catalog ordering

pub mod errors;

pub use errors::*;
