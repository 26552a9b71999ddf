//! IPC Handler for Catalog Ordering
//!
//! Validates each command body, delegates to the matching call-site adapter
//! and folds the outcome into an `OrderingResponse`.

use crate::application::{CategoryOrdering, MenuItemOrdering, RecommendationOrdering};
use crate::domain::errors::CatalogError;
use crate::ipc::payloads::{
    decode, CatalogOp, CategoryRequest, ListCategoriesRequest, ListMenuItemsRequest,
    ListRecommendationsRequest, MenuItemRequest, OrderingResponse, RecommendationRequest,
    ReorderCategoryRequest, ReorderMenuItemRequest, ReorderRecommendationRequest,
    UnregisterRecommendationRequest,
};
use mc_01_ordered_list::OrderedListApi;
use serde_json::Value;
use shared_types::{CategoryId, MenuItemId, RecommendationKey, RestaurantId};
use tracing::{debug, error, warn};

/// IPC Handler for Catalog Ordering.
pub struct CatalogOrderingHandler<C, M, R> {
    categories: CategoryOrdering<C>,
    menu_items: MenuItemOrdering<M>,
    recommendations: RecommendationOrdering<R>,
}

impl<C, M, R> CatalogOrderingHandler<C, M, R>
where
    C: OrderedListApi<Scope = RestaurantId, Id = CategoryId>,
    M: OrderedListApi<Scope = CategoryId, Id = MenuItemId>,
    R: OrderedListApi<Scope = MenuItemId, Id = RecommendationKey>,
{
    pub fn new(categories: C, menu_items: M, recommendations: R) -> Self {
        Self {
            categories: CategoryOrdering::new(categories),
            menu_items: MenuItemOrdering::new(menu_items),
            recommendations: RecommendationOrdering::new(recommendations),
        }
    }

    pub fn categories(&self) -> &CategoryOrdering<C> {
        &self.categories
    }

    pub fn menu_items(&self) -> &MenuItemOrdering<M> {
        &self.menu_items
    }

    pub fn recommendations(&self) -> &RecommendationOrdering<R> {
        &self.recommendations
    }

    /// Handle a named command. Unknown names are answered with a 400.
    pub async fn handle(&self, op: &str, body: &Value) -> OrderingResponse {
        match op.parse::<CatalogOp>() {
            Ok(op) => self.handle_op(op, body).await,
            Err(err) => {
                warn!("[mc-02] Rejected unknown operation '{}'", op);
                OrderingResponse::failure(&err)
            }
        }
    }

    /// Handle a parsed command.
    pub async fn handle_op(&self, op: CatalogOp, body: &Value) -> OrderingResponse {
        debug!("[mc-02] Handling {}", op);

        let result = match op {
            CatalogOp::RegisterCategory => self.register_category(body).await,
            CatalogOp::UnregisterCategory => self.unregister_category(body).await,
            CatalogOp::ReorderCategory => self.reorder_category(body).await,
            CatalogOp::ListCategories => self.list_categories(body).await,
            CatalogOp::RegisterMenuItem => self.register_menu_item(body).await,
            CatalogOp::UnregisterMenuItem => self.unregister_menu_item(body).await,
            CatalogOp::ReorderMenuItem => self.reorder_menu_item(body).await,
            CatalogOp::ListMenuItems => self.list_menu_items(body).await,
            CatalogOp::RegisterRecommendation => self.register_recommendation(body).await,
            CatalogOp::UnregisterRecommendation => self.unregister_recommendation(body).await,
            CatalogOp::ReorderRecommendation => self.reorder_recommendation(body).await,
            CatalogOp::ListRecommendations => self.list_recommendations(body).await,
        };

        result.unwrap_or_else(|err| {
            if err.status_code() >= 500 {
                error!("[mc-02] ❌ {} failed: {}", op, err);
            } else {
                warn!("[mc-02] {} rejected ({}): {}", op, err.status_code(), err);
            }
            OrderingResponse::failure(&err)
        })
    }

    async fn register_category(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<CategoryRequest>(body)?;
        let rank = self
            .categories
            .register(&request.restaurant_id, request.category_id)
            .await?;
        Ok(OrderingResponse::ok(
            201,
            format!("Category '{}' placed at position {rank}.", request.category_id),
        ))
    }

    async fn unregister_category(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<CategoryRequest>(body)?;
        self.categories
            .unregister(&request.restaurant_id, &request.category_id)
            .await?;
        Ok(OrderingResponse::ok(
            200,
            format!("Category '{}' removed.", request.category_id),
        ))
    }

    async fn reorder_category(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ReorderCategoryRequest>(body)?;
        self.categories
            .reorder(&request.category_id, &request.restaurant_id, request.new_index)
            .await?;
        Ok(OrderingResponse::ok(200, "Category reordered successfully."))
    }

    async fn list_categories(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ListCategoriesRequest>(body)?;
        let order = self.categories.list(&request.restaurant_id).await?;
        Ok(OrderingResponse::listing(&order))
    }

    async fn register_menu_item(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<MenuItemRequest>(body)?;
        let rank = self
            .menu_items
            .register(&request.category_id, request.item_id)
            .await?;
        Ok(OrderingResponse::ok(
            201,
            format!("Menu item '{}' placed at position {rank}.", request.item_id),
        ))
    }

    async fn unregister_menu_item(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<MenuItemRequest>(body)?;
        self.menu_items
            .unregister(&request.category_id, &request.item_id)
            .await?;
        Ok(OrderingResponse::ok(
            200,
            format!("Menu item '{}' removed.", request.item_id),
        ))
    }

    async fn reorder_menu_item(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ReorderMenuItemRequest>(body)?;
        let plan = self
            .menu_items
            .reorder(
                &request.item_id,
                request.category_id.as_ref(),
                request.new_index,
            )
            .await?;
        Ok(OrderingResponse::ok(
            200,
            format!(
                "Menu item '{}' successfully moved to position {}.",
                request.item_id,
                plan.to()
            ),
        ))
    }

    async fn list_menu_items(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ListMenuItemsRequest>(body)?;
        let order = self.menu_items.list(&request.category_id).await?;
        Ok(OrderingResponse::listing(&order))
    }

    async fn register_recommendation(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<RecommendationRequest>(body)?;
        let (key, rank) = self
            .recommendations
            .register(request.source_item_id, request.recommended_item_id)
            .await?;
        Ok(OrderingResponse::ok(
            201,
            format!("Recommendation '{key}' placed at position {rank}."),
        ))
    }

    async fn unregister_recommendation(
        &self,
        body: &Value,
    ) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<UnregisterRecommendationRequest>(body)?;
        self.recommendations
            .unregister(&request.recommendation_id)
            .await?;
        Ok(OrderingResponse::ok(
            200,
            format!("Recommendation '{}' removed.", request.recommendation_id),
        ))
    }

    async fn reorder_recommendation(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ReorderRecommendationRequest>(body)?;
        self.recommendations
            .reorder(
                &request.source_item_id,
                &request.recommendation_id,
                request.new_index,
            )
            .await?;
        Ok(OrderingResponse::ok(
            200,
            "Recommendation order updated successfully",
        ))
    }

    async fn list_recommendations(&self, body: &Value) -> Result<OrderingResponse, CatalogError> {
        let request = decode::<ListRecommendationsRequest>(body)?;
        let order = self.recommendations.list(&request.source_item_id).await?;
        Ok(OrderingResponse::listing(&order))
    }
}
