//! IPC Payloads for Catalog Ordering
//!
//! Request bodies arrive as untyped JSON and are decoded with `decode` into
//! the request structs below. Ids are checked by their own `Deserialize`
//! (malformed and nil ids are rejected), unknown fields are refused, and
//! `new_index` must be an integral number.

use crate::domain::errors::CatalogError;
use mc_01_ordered_list::Rank;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use shared_types::{CategoryId, MenuItemId, RecommendationKey, RestaurantId};
use std::fmt;
use std::str::FromStr;

// ============================================================
// OPERATIONS
// ============================================================

/// Operation named by an incoming command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    RegisterCategory,
    UnregisterCategory,
    ReorderCategory,
    ListCategories,
    RegisterMenuItem,
    UnregisterMenuItem,
    ReorderMenuItem,
    ListMenuItems,
    RegisterRecommendation,
    UnregisterRecommendation,
    ReorderRecommendation,
    ListRecommendations,
}

impl CatalogOp {
    pub const ALL: [CatalogOp; 12] = [
        CatalogOp::RegisterCategory,
        CatalogOp::UnregisterCategory,
        CatalogOp::ReorderCategory,
        CatalogOp::ListCategories,
        CatalogOp::RegisterMenuItem,
        CatalogOp::UnregisterMenuItem,
        CatalogOp::ReorderMenuItem,
        CatalogOp::ListMenuItems,
        CatalogOp::RegisterRecommendation,
        CatalogOp::UnregisterRecommendation,
        CatalogOp::ReorderRecommendation,
        CatalogOp::ListRecommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogOp::RegisterCategory => "register_category",
            CatalogOp::UnregisterCategory => "unregister_category",
            CatalogOp::ReorderCategory => "reorder_category",
            CatalogOp::ListCategories => "list_categories",
            CatalogOp::RegisterMenuItem => "register_menu_item",
            CatalogOp::UnregisterMenuItem => "unregister_menu_item",
            CatalogOp::ReorderMenuItem => "reorder_menu_item",
            CatalogOp::ListMenuItems => "list_menu_items",
            CatalogOp::RegisterRecommendation => "register_recommendation",
            CatalogOp::UnregisterRecommendation => "unregister_recommendation",
            CatalogOp::ReorderRecommendation => "reorder_recommendation",
            CatalogOp::ListRecommendations => "list_recommendations",
        }
    }
}

impl fmt::Display for CatalogOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogOp {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| CatalogError::Validation(format!("Unknown operation '{s}'")))
    }
}

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Register or unregister a category within its restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRequest {
    pub restaurant_id: RestaurantId,
    pub category_id: CategoryId,
}

/// Move a category to `new_index`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReorderCategoryRequest {
    pub restaurant_id: RestaurantId,
    pub category_id: CategoryId,
    #[serde(deserialize_with = "index")]
    pub new_index: Rank,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListCategoriesRequest {
    pub restaurant_id: RestaurantId,
}

/// Register or unregister a menu item within its category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItemRequest {
    pub category_id: CategoryId,
    pub item_id: MenuItemId,
}

/// Move a menu item to `new_index` in its current category.
///
/// `category_id` is optional; when present it must match the item's category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReorderMenuItemRequest {
    pub item_id: MenuItemId,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(deserialize_with = "index")]
    pub new_index: Rank,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListMenuItemsRequest {
    pub category_id: CategoryId,
}

/// Register a recommendation edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationRequest {
    pub source_item_id: MenuItemId,
    pub recommended_item_id: MenuItemId,
}

/// Unregister a recommendation by its `source->recommended` id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnregisterRecommendationRequest {
    pub recommendation_id: RecommendationKey,
}

/// Move a recommendation to `new_index` within its source item's list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReorderRecommendationRequest {
    pub source_item_id: MenuItemId,
    pub recommendation_id: RecommendationKey,
    #[serde(deserialize_with = "index")]
    pub new_index: Rank,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRecommendationsRequest {
    pub source_item_id: MenuItemId,
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Response to every catalog command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingResponse {
    /// Whether the command succeeded
    pub success: bool,
    /// HTTP-style status code
    pub status: u16,
    /// Human readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Ids in display order (list commands)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OrderingResponse {
    pub fn ok(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status,
            message: Some(message.into()),
            order: None,
            error: None,
        }
    }

    pub fn listing<T: ToString>(ids: &[T]) -> Self {
        Self {
            success: true,
            status: 200,
            message: None,
            order: Some(ids.iter().map(ToString::to_string).collect()),
            error: None,
        }
    }

    pub fn failure(err: &CatalogError) -> Self {
        Self {
            success: false,
            status: err.status_code(),
            message: None,
            order: None,
            error: Some(err.to_string()),
        }
    }
}

// ============================================================
// DECODING
// ============================================================

/// Decode a request body into `T`.
pub fn decode<T: DeserializeOwned>(body: &Value) -> Result<T, CatalogError> {
    T::deserialize(body)
        .map_err(|err| CatalogError::Validation(format!("Invalid request body: {err}")))
}

/// `new_index` as a rank. Integral floats such as `2.0` are accepted.
fn index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rank, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(index) = number.as_i64() {
        return Ok(index);
    }

    let out_of_range = || de::Error::custom("'new_index' is out of range");
    if number.as_u64().is_some() {
        return Err(out_of_range());
    }
    match number.as_f64() {
        Some(value) if value.fract() != 0.0 => {
            Err(de::Error::custom("'new_index' must be an integer"))
        }
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        Some(value) if value >= i64::MIN as f64 && value < i64::MAX as f64 => {
            Ok(value as Rank)
        }
        _ => Err(out_of_range()),
    }
}
