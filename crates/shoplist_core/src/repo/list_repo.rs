//! Shopping list repository: lists joined with their live items.
//!
//! # Responsibility
//! - Keep every observed list populated with its current items.
//! - Replace per-list item subscriptions whenever the set of lists changes.
//!
//! # Invariants
//! - An emitted snapshot never mixes item data from a superseded list set.
//! - A list is emitted only with items read while its row still existed.
//! - An empty list collection is emitted as-is, with no item subscriptions.
//! - A missing single list is emitted as `None`, not as an error.

use crate::live::{self, LiveQuery};
use crate::model::shopping::{EntityId, Item, ShoppingList};
use crate::repo::RepoResult;
use crate::store::LocalDataSource;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads and writes shopping lists.
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Live collection of all lists, each populated with its items.
    fn shopping_lists(&self) -> LiveQuery<Vec<ShoppingList>>;
    /// Live single list populated with its items, `None` when absent.
    fn shopping_list(&self, list_id: EntityId) -> LiveQuery<Option<ShoppingList>>;
    /// Creates an empty list and returns its id.
    async fn add_shopping_list(&self, name: &str) -> RepoResult<EntityId>;
    /// Deletes a list and, through the store, all of its items.
    async fn delete_shopping_list(&self, list: &ShoppingList) -> RepoResult<()>;
}

/// List repository delegating to a `LocalDataSource`.
pub struct LocalShoppingListRepository {
    source: Arc<dyn LocalDataSource>,
}

impl LocalShoppingListRepository {
    pub fn new(source: Arc<dyn LocalDataSource>) -> Self {
        Self { source }
    }

    fn with_items(&self, lists: LiveQuery<Vec<ShoppingList>>) -> LiveQuery<Vec<ShoppingList>> {
        let source = Arc::clone(&self.source);
        live::switch_combine(
            lists,
            move |list: &ShoppingList| source.observe_list_items(list.id),
            |list: &ShoppingList, items: &Option<Vec<Item>>| {
                // `None`: the list is gone and `lists` has not caught up yet.
                items.as_ref().map(|items| ShoppingList {
                    items: items.clone(),
                    ..list.clone()
                })
            },
        )
    }
}

#[async_trait]
impl ShoppingListRepository for LocalShoppingListRepository {
    fn shopping_lists(&self) -> LiveQuery<Vec<ShoppingList>> {
        self.with_items(self.source.observe_shopping_lists())
    }

    fn shopping_list(&self, list_id: EntityId) -> LiveQuery<Option<ShoppingList>> {
        let found = self
            .source
            .observe_shopping_list(list_id)
            .map(|list| list.into_iter().collect::<Vec<_>>());
        self.with_items(found).map(|lists| lists.into_iter().next())
    }

    async fn add_shopping_list(&self, name: &str) -> RepoResult<EntityId> {
        self.source
            .insert_shopping_list(&ShoppingList::new(name))
            .await
    }

    async fn delete_shopping_list(&self, list: &ShoppingList) -> RepoResult<()> {
        self.source.delete_shopping_list(list).await
    }
}
