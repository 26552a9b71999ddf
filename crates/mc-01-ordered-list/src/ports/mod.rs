//! Ports module for the ordered sibling list
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::OrderedListApi;
pub use outbound::{RankStore, RankTransaction};
