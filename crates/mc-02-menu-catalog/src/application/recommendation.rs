//! Recommendation ordering per source menu item

use crate::domain::errors::CatalogError;
use mc_01_ordered_list::{MovePlan, OrderedListApi, OrderingError, Rank};
use shared_types::{MenuItemId, RecommendationKey};
use tracing::warn;

/// Orders the items recommended alongside a source item.
pub struct RecommendationOrdering<L> {
    list: L,
}

impl<L> RecommendationOrdering<L>
where
    L: OrderedListApi<Scope = MenuItemId, Id = RecommendationKey>,
{
    pub fn new(list: L) -> Self {
        Self { list }
    }

    /// The underlying ordered list.
    pub fn list_manager(&self) -> &L {
        &self.list
    }

    /// Append `recommended` to the recommendations of `source`.
    pub async fn register(
        &self,
        source: MenuItemId,
        recommended: MenuItemId,
    ) -> Result<(RecommendationKey, Rank), CatalogError> {
        let key = RecommendationKey::new(source, recommended);
        if key.is_self_loop() {
            warn!(%source, "Self-recommendation rejected");
            return Err(CatalogError::SelfRecommendation);
        }

        match self.list.append(&source, key).await {
            Ok(rank) => Ok((key, rank)),
            Err(OrderingError::AlreadyRanked { .. }) => Err(CatalogError::DuplicateRecommendation),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn unregister(&self, key: &RecommendationKey) -> Result<(), CatalogError> {
        Ok(self.list.remove(&key.source, key).await?)
    }

    /// Move the recommendation `key` to `new_index` within `source`'s list.
    ///
    /// The recommendation must exist and belong to `source`.
    pub async fn reorder(
        &self,
        source: &MenuItemId,
        key: &RecommendationKey,
        new_index: Rank,
    ) -> Result<MovePlan<RecommendationKey>, CatalogError> {
        let current = self.list.locate(key).await?;
        if current.scope != *source {
            warn!(%source, recommendation = %key, "Recommendation belongs to another item");
            return Err(CatalogError::Validation(
                "Recommendation does not belong to the specified source item.".to_string(),
            ));
        }
        Ok(self.list.move_to(source, key, new_index).await?)
    }

    /// Recommendations of `source` in display order.
    pub async fn list(&self, source: &MenuItemId) -> Result<Vec<RecommendationKey>, CatalogError> {
        Ok(self.list.list(source).await?)
    }
}
