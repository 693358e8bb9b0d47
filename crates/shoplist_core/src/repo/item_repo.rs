//! Item repository contract and implementation.

use crate::live::LiveQuery;
use crate::model::shopping::{EntityId, Item};
use crate::repo::RepoResult;
use crate::store::LocalDataSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads and writes items of a shopping list.
#[async_trait]
pub trait ShoppingItemRepository: Send + Sync {
    /// Live items of `list_id`, ordered by id.
    fn items_for_list(&self, list_id: EntityId) -> LiveQuery<Vec<Item>>;
    /// Adds an unchecked item and returns its id.
    async fn add_item(&self, list_id: EntityId, name: &str) -> RepoResult<EntityId>;
    /// Full replace of an existing item (upsert by id).
    async fn update_item(&self, item: &Item) -> RepoResult<()>;
    async fn delete_item(&self, item: &Item) -> RepoResult<()>;
}

/// Item repository delegating to a `LocalDataSource`.
pub struct LocalShoppingItemRepository {
    source: Arc<dyn LocalDataSource>,
}

impl LocalShoppingItemRepository {
    pub fn new(source: Arc<dyn LocalDataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl ShoppingItemRepository for LocalShoppingItemRepository {
    fn items_for_list(&self, list_id: EntityId) -> LiveQuery<Vec<Item>> {
        self.source.observe_items_for_list(list_id)
    }

    async fn add_item(&self, list_id: EntityId, name: &str) -> RepoResult<EntityId> {
        self.source.insert_item(&Item::new(list_id, name)).await
    }

    async fn update_item(&self, item: &Item) -> RepoResult<()> {
        self.source.insert_item(item).await?;
        Ok(())
    }

    async fn delete_item(&self, item: &Item) -> RepoResult<()> {
        self.source.delete_item(item).await
    }
}
