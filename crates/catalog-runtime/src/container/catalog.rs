//! Wiring of stores, list managers and the catalog handler.

use super::config::RuntimeConfig;
use mc_01_ordered_list::{InMemoryRankStore, Key, OrderedListManager, RankStore};
use mc_02_menu_catalog::CatalogOrderingHandler;
use shared_types::{CategoryId, MenuItemId, RecommendationKey, RestaurantId};
use std::sync::Arc;
use tracing::info;

pub type CategoryList = OrderedListManager<InMemoryRankStore<RestaurantId, CategoryId>>;
pub type MenuItemList = OrderedListManager<InMemoryRankStore<CategoryId, MenuItemId>>;
pub type RecommendationList = OrderedListManager<InMemoryRankStore<MenuItemId, RecommendationKey>>;
pub type RuntimeHandler = CatalogOrderingHandler<CategoryList, MenuItemList, RecommendationList>;

/// Everything the driver needs, built once at startup.
pub struct CatalogContainer {
    config: RuntimeConfig,
    handler: Arc<RuntimeHandler>,
}

impl CatalogContainer {
    pub fn new(config: RuntimeConfig) -> Self {
        let handler = CatalogOrderingHandler::new(
            manager(&config),
            manager(&config),
            manager(&config),
        );

        info!(
            rank_base = config.ordering.rank_base.first(),
            concurrency = handler.categories().list_manager().store().concurrency().as_str(),
            max_scope_size = config.ordering.max_scope_size,
            "Catalog container ready"
        );

        Self {
            config,
            handler: Arc::new(handler),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn handler(&self) -> Arc<RuntimeHandler> {
        Arc::clone(&self.handler)
    }
}

fn manager<S: Key, I: Key>(config: &RuntimeConfig) -> OrderedListManager<InMemoryRankStore<S, I>> {
    OrderedListManager::with_config(
        InMemoryRankStore::new(config.store.concurrency),
        config.ordering.clone(),
    )
}
