//! Menu item ordering within a category

use crate::domain::errors::CatalogError;
use mc_01_ordered_list::{MovePlan, OrderedListApi, Rank};
use shared_types::{CategoryId, MenuItemId};
use tracing::warn;

/// Orders the menu items of a category.
pub struct MenuItemOrdering<L> {
    list: L,
}

impl<L> MenuItemOrdering<L>
where
    L: OrderedListApi<Scope = CategoryId, Id = MenuItemId>,
{
    pub fn new(list: L) -> Self {
        Self { list }
    }

    /// The underlying ordered list.
    pub fn list_manager(&self) -> &L {
        &self.list
    }

    pub async fn register(&self, category: &CategoryId, item: MenuItemId) -> Result<Rank, CatalogError> {
        Ok(self.list.append(category, item).await?)
    }

    pub async fn unregister(&self, category: &CategoryId, item: &MenuItemId) -> Result<(), CatalogError> {
        Ok(self.list.remove(category, item).await?)
    }

    /// Move `item` to `new_index` inside the category it already belongs to.
    ///
    /// When the caller names a category, it must be the item's current one:
    /// moving an item to another category is not an ordering operation.
    pub async fn reorder(
        &self,
        item: &MenuItemId,
        category: Option<&CategoryId>,
        new_index: Rank,
    ) -> Result<MovePlan<MenuItemId>, CatalogError> {
        let current = self.list.locate(item).await?;
        if let Some(requested) = category {
            if *requested != current.scope {
                warn!(%item, from = %current.scope, to = %requested, "Cross-category move rejected");
                return Err(CatalogError::Validation(format!(
                    "Menu item '{item}' belongs to category '{}'; changing category is not supported.",
                    current.scope
                )));
            }
        }
        Ok(self.list.move_to(&current.scope, item, new_index).await?)
    }

    /// Items of `category` in display order; empty when it has none.
    pub async fn list(&self, category: &CategoryId) -> Result<Vec<MenuItemId>, CatalogError> {
        Ok(self.list.list(category).await?)
    }
}
