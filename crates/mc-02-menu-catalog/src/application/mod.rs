//! Application layer: call-site adapters over the ordered list

pub mod category;
pub mod menu_item;
pub mod recommendation;

pub use category::CategoryOrdering;
pub use menu_item::MenuItemOrdering;
pub use recommendation::RecommendationOrdering;
