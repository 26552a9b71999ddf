//! IPC Module for Catalog Ordering
//!
//! Requests arrive as untyped JSON bodies, are validated into the typed
//! requests of `payloads`, and are answered with an `OrderingResponse`.

pub mod handler;
pub mod payloads;

pub use handler::CatalogOrderingHandler;
pub use payloads::*;
