//! Category ordering within a restaurant

use crate::domain::errors::CatalogError;
use mc_01_ordered_list::{MovePlan, OrderedListApi, Rank};
use shared_types::{CategoryId, RestaurantId};
use tracing::debug;

/// Orders a restaurant's categories.
pub struct CategoryOrdering<L> {
    list: L,
}

impl<L> CategoryOrdering<L>
where
    L: OrderedListApi<Scope = RestaurantId, Id = CategoryId>,
{
    pub fn new(list: L) -> Self {
        Self { list }
    }

    /// The underlying ordered list.
    pub fn list_manager(&self) -> &L {
        &self.list
    }

    /// Place a newly created category at the end of its restaurant.
    pub async fn register(
        &self,
        restaurant: &RestaurantId,
        category: CategoryId,
    ) -> Result<Rank, CatalogError> {
        Ok(self.list.append(restaurant, category).await?)
    }

    /// Drop a deleted category and close the gap it leaves.
    pub async fn unregister(
        &self,
        restaurant: &RestaurantId,
        category: &CategoryId,
    ) -> Result<(), CatalogError> {
        Ok(self.list.remove(restaurant, category).await?)
    }

    pub async fn reorder(
        &self,
        category: &CategoryId,
        restaurant: &RestaurantId,
        new_index: Rank,
    ) -> Result<MovePlan<CategoryId>, CatalogError> {
        Ok(self.list.move_to(restaurant, category, new_index).await?)
    }

    /// Categories of `restaurant` in display order.
    ///
    /// A restaurant without categories is reported as not found.
    pub async fn list(&self, restaurant: &RestaurantId) -> Result<Vec<CategoryId>, CatalogError> {
        let categories = self.list.list(restaurant).await?;
        if categories.is_empty() {
            debug!(%restaurant, "Restaurant has no categories");
            return Err(CatalogError::NotFound(format!(
                "No categories found for restaurant with ID {restaurant}"
            )));
        }
        Ok(categories)
    }
}
