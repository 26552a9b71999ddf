//! # Error Types
//!
//! Defines error types used across crates.

use thiserror::Error;

/// Errors raised when parsing an identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    /// Not a UUID.
    #[error("Invalid {kind} id '{value}'")]
    Malformed { kind: &'static str, value: String },

    /// The nil UUID is never a valid identifier.
    #[error("{kind} id must not be nil")]
    Nil { kind: &'static str },
}
