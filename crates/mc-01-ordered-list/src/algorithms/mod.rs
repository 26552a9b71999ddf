//! Algorithms module for the ordered sibling list
//!
//! Contains:
//! - Interval shift reorder planner
//! - Append / removal compaction / resequencing

pub mod compaction;
pub mod interval_shift;

pub use compaction::{next_rank, plan_removal, plan_resequence};
pub use interval_shift::{apply_plan, plan_move};
